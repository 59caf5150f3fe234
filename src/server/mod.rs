use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::search::Searcher;

pub mod routes;

/// Server state
pub struct AppState {
    pub searcher: Searcher,
}

pub fn router(searcher: Searcher) -> Router {
    let state = Arc::new(AppState { searcher });

    Router::new()
        .route("/search", get(routes::search))
        .route("/tables", get(routes::tables))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, searcher: Searcher) -> anyhow::Result<()> {
    let app = router(searcher);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);
    println!("{} Server running at http://{}", crate::ui::Icons::GLOBE, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
