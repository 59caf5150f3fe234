//! Storage Layer - read-only access to the bundled SQLite database
//!
//! Nothing here assumes a schema. The layer provides:
//! - a shared `Database` handle (one connection behind a mutex)
//! - providers that create that handle lazily, exactly once
//! - catalog introspection (tables, columns, declared types)

pub mod schema;
pub mod sqlite;
pub mod provider;
pub mod introspect;

pub use sqlite::Database;
pub use provider::{BundledProvider, DatabaseProvider, MemoryProvider};
pub use introspect::{ColumnDescriptor, TableSummary, describe, list_columns, list_tables};
