use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use crate::server::AppState;
use crate::storage::TableSummary;

#[derive(Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub found: bool,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(e: crate::Error) -> ApiError {
    tracing::error!("Lookup failed: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error: e.to_string() }))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let outcome = state.searcher.search(&params.query).await.map_err(internal)?;

    Ok(Json(SearchResponse {
        query: params.query,
        found: outcome.is_found(),
        text: outcome.to_text(),
    }))
}

pub async fn tables(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TableSummary>>, ApiError> {
    let tables = state.searcher.tables().await.map_err(internal)?;
    Ok(Json(tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{NOT_FOUND, Searcher};
    use crate::storage::{BundledProvider, MemoryProvider};

    fn state(script: &str) -> State<Arc<AppState>> {
        let searcher = Searcher::new(Arc::new(MemoryProvider::new(script)));
        State(Arc::new(AppState { searcher }))
    }

    #[tokio::test]
    async fn test_search_route() {
        let state = state("CREATE TABLE chips (pn TEXT); INSERT INTO chips VALUES ('PM660');");

        let Json(hit) = search(state.clone(), Query(SearchParams { query: "pm660".into() }))
            .await
            .unwrap();
        assert!(hit.found);
        assert_eq!(hit.text, "Table: chips\npn: PM660");

        let Json(miss) = search(state, Query(SearchParams { query: "nope".into() })).await.unwrap();
        assert!(!miss.found);
        assert_eq!(miss.text, NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tables_route() {
        let Json(tables) = tables(state("CREATE TABLE a (x); CREATE TABLE b (y);")).await.unwrap();
        assert_eq!(tables.len(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_database_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let provider = BundledProvider::new(dir.path().join("missing.db"), dir.path().join("data"));
        let state = State(Arc::new(AppState { searcher: Searcher::new(Arc::new(provider)) }));

        let (status, Json(body)) = search(state, Query(SearchParams { query: "PM660".into() }))
            .await
            .err()
            .unwrap();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.contains("missing.db"));
    }
}
