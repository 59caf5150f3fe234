//! # icfinder - Part number lookup over an unknown SQLite schema
//!
//! icfinder answers "what is this chip?" against a bundled SQLite database
//! whose layout is not known ahead of time.
//!
//! icfinder provides:
//! - Runtime schema introspection (tables, columns, declared types)
//! - Column classification by name and type heuristics
//! - A three-pass record search (exact, substring, free text)
//! - A lazily opened, shared database handle behind a provider trait
//! - A bounded lookup history and CLI/HTTP front ends

pub mod storage;
pub mod search;
pub mod history;
pub mod server;
pub mod ui;
pub mod output;
pub mod config;


// Re-exports for convenient access
pub use storage::{BundledProvider, Database, DatabaseProvider, MemoryProvider};
pub use search::{MatchRecord, Pass, SearchOutcome, Searcher, NOT_FOUND};
pub use history::{History, HistoryEntry};

/// Result type alias for icfinder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for icfinder operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Bundled database not found: {0}")]
    AssetNotFound(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("History error: {0}")]
    History(#[from] serde_json::Error),
}
