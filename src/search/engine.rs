//! Search orchestration
//!
//! Runs the passes in order over the tables in catalog order. Each
//! (pass, table) probe yields a `Probe`; the first `Hit` ends the search and
//! a `Skip` only moves on to the next table.

use std::sync::Arc;
use rusqlite::Connection;
use crate::storage::{ColumnDescriptor, DatabaseProvider, TableSummary, introspect};
use crate::{Error, Result};
use super::query::CandidateQuery;
use super::{MatchRecord, Pass, SearchOutcome, samples};

/// Why a table was passed over
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No column qualifies for the current pass
    NoCandidateColumns,
    /// Column metadata could not be read
    Metadata(String),
    /// The candidate query failed
    Query(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoCandidateColumns => write!(f, "no candidate columns"),
            SkipReason::Metadata(e) => write!(f, "metadata error: {}", e),
            SkipReason::Query(e) => write!(f, "query error: {}", e),
        }
    }
}

/// Outcome of probing one table in one pass
#[derive(Debug, Clone, PartialEq)]
pub enum Probe {
    Hit(MatchRecord),
    Miss,
    Skip(SkipReason),
}

/// A table and its columns as seen at the start of a search
#[derive(Debug, Clone)]
pub struct CatalogTable {
    pub name: String,
    /// Column metadata, or the error that prevented reading it
    pub columns: std::result::Result<Vec<ColumnDescriptor>, String>,
}

impl CatalogTable {
    /// Read the catalog once; all passes of a search share it
    pub fn load_all(conn: &Connection) -> Result<Vec<CatalogTable>> {
        let tables = introspect::list_tables(conn)?
            .into_iter()
            .map(|name| {
                let columns = introspect::list_columns(conn, &name).map_err(|e| e.to_string());
                CatalogTable { name, columns }
            })
            .collect();
        Ok(tables)
    }
}

/// Probe one table with one pass
pub fn probe_table(
    conn: &Connection,
    table: &str,
    columns: &[ColumnDescriptor],
    pass: Pass,
    term: &str,
) -> Probe {
    let candidates = pass.select_columns(columns);
    let Some(query) = CandidateQuery::build(table, &candidates, pass.comparison(), term) else {
        return Probe::Skip(SkipReason::NoCandidateColumns);
    };

    match query.first_row(conn) {
        Ok(Some(fields)) => Probe::Hit(MatchRecord::new(table, fields, pass)),
        Ok(None) => Probe::Miss,
        Err(e) => Probe::Skip(SkipReason::Query(e.to_string())),
    }
}

/// Run the passes over `catalog`, asking `probe` about each table.
///
/// Tables whose metadata failed are skipped without probing. The first hit
/// ends the search; a miss or skip moves on to the next table.
pub fn run_passes<F>(catalog: &[CatalogTable], mut probe: F) -> SearchOutcome
where
    F: FnMut(&str, &[ColumnDescriptor], Pass) -> Probe,
{
    for pass in Pass::ALL {
        for table in catalog {
            let result = match &table.columns {
                Ok(columns) => probe(&table.name, columns, pass),
                Err(e) => Probe::Skip(SkipReason::Metadata(e.clone())),
            };

            match result {
                Probe::Hit(record) => {
                    tracing::debug!("Match in {} ({} pass)", record.table, pass.as_str());
                    return SearchOutcome::Found(record);
                }
                Probe::Miss => {}
                Probe::Skip(reason) => {
                    tracing::debug!("Skipping {} in {} pass: {}", table.name, pass.as_str(), reason);
                }
            }
        }
    }

    SearchOutcome::NotFound
}

/// Search an open connection for `query`.
///
/// Never fails: unreadable tables are skipped and an exhausted search is
/// `SearchOutcome::NotFound`.
pub fn search_connection(conn: &Connection, query: &str) -> SearchOutcome {
    let term = query.trim();
    if term.is_empty() {
        return SearchOutcome::NotFound;
    }

    let catalog = match CatalogTable::load_all(conn) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!("Could not list tables: {}", e);
            return SearchOutcome::NotFound;
        }
    };

    run_passes(&catalog, |table, columns, pass| probe_table(conn, table, columns, pass, term))
}

/// Caller-facing search over a provided database
#[derive(Clone)]
pub struct Searcher {
    provider: Arc<dyn DatabaseProvider>,
}

impl Searcher {
    pub fn new(provider: Arc<dyn DatabaseProvider>) -> Self {
        Self { provider }
    }

    /// Search for the best-matching record.
    ///
    /// A blank query returns `NotFound` without touching the provider. The
    /// only error is failing to obtain the database handle.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let term = query.trim().to_string();
        if term.is_empty() {
            return Ok(SearchOutcome::NotFound);
        }

        self.with_database(move |conn| search_connection(conn, &term)).await
    }

    /// Search and render: a formatted record or the not-found sentinel
    pub async fn search_record(&self, query: &str) -> Result<String> {
        Ok(self.search(query).await?.to_text())
    }

    /// Every table with its columns
    pub async fn tables(&self) -> Result<Vec<TableSummary>> {
        self.with_database(introspect::describe).await?
    }

    /// Distinct identifier-like values, useful as example queries
    pub async fn samples(&self, limit: usize) -> Result<Vec<String>> {
        self.with_database(move |conn| samples::sample_values(conn, limit)).await
    }

    async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> T + Send + 'static,
    {
        let db = self.provider.handle().await?;
        tokio::task::spawn_blocking(move || db.with_conn(f))
            .await
            .map_err(|e| Error::Unavailable(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{FieldValue, NOT_FOUND};
    use crate::storage::MemoryProvider;

    const FIXTURE: &str = r#"
        CREATE TABLE emmc (id INTEGER PRIMARY KEY, part_number TEXT, vendor TEXT, capacity TEXT);
        INSERT INTO emmc VALUES (1, 'KMQ7X000SA-B315', 'Samsung', '16GB');
        INSERT INTO emmc VALUES (2, 'H9TQ17ABJTMCUR', 'Hynix', '16GB');

        CREATE TABLE pmic (name TEXT, chip TEXT, description TEXT, rev);
        INSERT INTO pmic VALUES ('Power manager', 'PM660', 'Used with SDM660 platforms', 'A1');
        INSERT INTO pmic VALUES ('Charger', 'SMB1350', 'Quick charge companion', NULL);

        CREATE TABLE notes (body TEXT, weight REAL);
        INSERT INTO notes VALUES ('Tested against the hynix H9TQ17 batch', 1.5);
    "#;

    fn conn(script: &str) -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(script).unwrap();
        conn
    }

    fn found(outcome: SearchOutcome) -> MatchRecord {
        match outcome {
            SearchOutcome::Found(record) => record,
            SearchOutcome::NotFound => panic!("expected a match"),
        }
    }

    #[test]
    fn test_exact_match_uses_first_pass() {
        let conn = conn(FIXTURE);
        let record = found(search_connection(&conn, "  pm660 "));
        assert_eq!(record.table, "pmic");
        assert_eq!(record.pass, Pass::Exact);
        assert_eq!(record.get("chip"), Some(&FieldValue::from("PM660")));
    }

    #[test]
    fn test_exact_beats_substring_in_earlier_table() {
        // 'ACME-SMB' is a substring in `a` but an exact value in `b`
        let conn = conn(
            "CREATE TABLE a (model TEXT); INSERT INTO a VALUES ('ACME-SMB-2');
             CREATE TABLE b (model TEXT); INSERT INTO b VALUES ('acme-smb');",
        );
        let record = found(search_connection(&conn, "ACME-SMB"));
        assert_eq!(record.table, "b");
        assert_eq!(record.pass, Pass::Exact);
    }

    #[test]
    fn test_substring_match_uses_second_pass() {
        let conn = conn(FIXTURE);
        let record = found(search_connection(&conn, "q7x000"));
        assert_eq!(record.table, "emmc");
        assert_eq!(record.pass, Pass::Partial);
        assert_eq!(record.get("id"), Some(&FieldValue::Integer(1)));
    }

    #[test]
    fn test_free_text_match_uses_third_pass() {
        let conn = conn(FIXTURE);
        let record = found(search_connection(&conn, "quick charge"));
        assert_eq!(record.table, "pmic");
        assert_eq!(record.pass, Pass::FreeText);
        assert_eq!(record.get("chip"), Some(&FieldValue::from("SMB1350")));
    }

    #[test]
    fn test_identifier_pass_wins_over_earlier_free_text() {
        // notes comes first in the catalog and only matches as free text
        let conn = conn(
            "CREATE TABLE notes (body TEXT);
             INSERT INTO notes VALUES ('Tested against the hynix H9TQ17 batch');
             CREATE TABLE emmc (part_number TEXT, vendor TEXT);
             INSERT INTO emmc VALUES ('H9TQ17ABJTMCUR', 'Hynix');",
        );
        assert_eq!(introspect::list_tables(&conn).unwrap(), vec!["notes", "emmc"]);

        let record = found(search_connection(&conn, "h9tq17"));
        assert_eq!(record.table, "emmc");
        assert_eq!(record.pass, Pass::Partial);
    }

    #[test]
    fn test_not_found() {
        let conn = conn(FIXTURE);
        assert_eq!(search_connection(&conn, "ZZZ-NOPE"), SearchOutcome::NotFound);
    }

    #[test]
    fn test_blank_query() {
        let conn = conn(FIXTURE);
        assert_eq!(search_connection(&conn, "   "), SearchOutcome::NotFound);
    }

    #[test]
    fn test_empty_database() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(search_connection(&conn, "PM660"), SearchOutcome::NotFound);
    }

    #[test]
    fn test_probe_reports_skip_without_candidates() {
        let conn = conn(FIXTURE);
        let columns = introspect::list_columns(&conn, "notes").unwrap();
        assert_eq!(
            probe_table(&conn, "notes", &columns, Pass::Exact, "x"),
            Probe::Skip(SkipReason::NoCandidateColumns)
        );
        assert_eq!(probe_table(&conn, "notes", &columns, Pass::FreeText, "nothing here"), Probe::Miss);
    }

    #[test]
    fn test_probe_reports_query_failure() {
        let conn = conn(FIXTURE);
        let columns = vec![ColumnDescriptor::new("missing_code", "TEXT")];
        let probe = probe_table(&conn, "pmic", &columns, Pass::Exact, "PM660");
        assert!(matches!(probe, Probe::Skip(SkipReason::Query(_))));
    }

    #[test]
    fn test_unknown_column_never_matches_its_own_name() {
        let conn = conn(FIXTURE);
        let columns = vec![ColumnDescriptor::new("missing_code", "TEXT")];
        for pass in [Pass::Partial, Pass::FreeText] {
            let result = probe_table(&conn, "pmic", &columns, pass, "missing");
            assert!(matches!(result, Probe::Skip(SkipReason::Query(_))), "{:?}", result);
        }
    }

    fn catalog(names: &[&str]) -> Vec<CatalogTable> {
        names
            .iter()
            .map(|name| CatalogTable {
                name: name.to_string(),
                columns: Ok(vec![ColumnDescriptor::new("part", "TEXT")]),
            })
            .collect()
    }

    #[test]
    fn test_failing_first_pass_falls_through() {
        let catalog = catalog(&["a", "b", "c"]);
        let mut visits = Vec::new();

        let outcome = run_passes(&catalog, |table, _, pass| {
            visits.push((pass, table.to_string()));
            match (pass, table) {
                (Pass::Exact, _) => Probe::Skip(SkipReason::Query("boom".into())),
                (Pass::FreeText, "b") => Probe::Hit(MatchRecord::new(table, Vec::new(), pass)),
                _ => Probe::Miss,
            }
        });

        let record = found(outcome);
        assert_eq!(record.table, "b");
        assert_eq!(record.pass, Pass::FreeText);
        // Every table is tried in pass order; nothing after the hit
        assert_eq!(visits.len(), 3 + 3 + 2);
        assert_eq!(visits.last().unwrap(), &(Pass::FreeText, "b".to_string()));
    }

    #[test]
    fn test_all_failures_are_not_found() {
        let catalog = catalog(&["a", "b"]);
        let outcome = run_passes(&catalog, |_, _, _| Probe::Skip(SkipReason::Query("bad".into())));
        assert_eq!(outcome, SearchOutcome::NotFound);
    }

    #[test]
    fn test_first_table_wins_within_pass() {
        let catalog = catalog(&["a", "b", "c"]);
        let mut visits = 0;
        let outcome = run_passes(&catalog, |table, _, pass| {
            visits += 1;
            if pass == Pass::Partial && table != "a" {
                Probe::Hit(MatchRecord::new(table, Vec::new(), pass))
            } else {
                Probe::Miss
            }
        });
        assert_eq!(found(outcome).table, "b");
        assert_eq!(visits, 3 + 2);
    }

    #[test]
    fn test_metadata_failure_skips_table() {
        let mut catalog = catalog(&["a", "b"]);
        catalog[0].columns = Err("no such table".into());
        let mut probed = Vec::new();
        let outcome = run_passes(&catalog, |table, _, _| {
            probed.push(table.to_string());
            Probe::Miss
        });
        assert_eq!(outcome, SearchOutcome::NotFound);
        assert!(probed.iter().all(|t| t == "b"));
        assert_eq!(probed.len(), 3);
    }

    #[tokio::test]
    async fn test_blank_query_never_touches_provider() {
        let provider = Arc::new(MemoryProvider::new(FIXTURE));
        let searcher = Searcher::new(provider.clone());

        assert_eq!(searcher.search_record("").await.unwrap(), NOT_FOUND);
        assert_eq!(searcher.search_record(" \n\t ").await.unwrap(), NOT_FOUND);
        assert_eq!(provider.acquisitions(), 0);
        assert_eq!(provider.initializations(), 0);
    }

    #[tokio::test]
    async fn test_search_record_formats_match() {
        let provider = Arc::new(MemoryProvider::new(FIXTURE));
        let searcher = Searcher::new(provider.clone());

        let text = searcher.search_record("PM660").await.unwrap();
        assert_eq!(
            text,
            "Table: pmic\nname: Power manager\nchip: PM660\ndescription: Used with SDM660 platforms\nrev: A1"
        );
        assert_eq!(searcher.search_record("nothing-like-this").await.unwrap(), NOT_FOUND);
        assert_eq!(provider.initializations(), 1);
    }

    #[tokio::test]
    async fn test_provider_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let provider = crate::storage::BundledProvider::new(dir.path().join("absent.db"), dir.path().join("data"));
        let searcher = Searcher::new(Arc::new(provider));

        assert!(matches!(searcher.search_record("PM660").await, Err(Error::AssetNotFound(_))));
        // Blank input still short-circuits
        assert_eq!(searcher.search_record("").await.unwrap(), NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tables_and_samples() {
        let searcher = Searcher::new(Arc::new(MemoryProvider::new(FIXTURE)));
        let tables = searcher.tables().await.unwrap();
        let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["emmc", "pmic", "notes"]);

        let samples = searcher.samples(2).await.unwrap();
        assert_eq!(samples.len(), 2);
    }
}
