//! Schema introspection
//!
//! Reads the catalog at query time. No schema is assumed and nothing is
//! cached between searches.

use rusqlite::Connection;
use serde::Serialize;
use crate::Result;
use crate::search::classify;
use super::schema;

/// A column as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Declared type, empty when the column has none
    pub declared_type: String,
}

impl ColumnDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }

    pub fn is_identifier_likely(&self) -> bool {
        classify::is_identifier_likely(&self.name)
    }

    pub fn is_text_likely(&self) -> bool {
        classify::is_text_likely(&self.declared_type)
    }
}

/// A table with its columns, for display
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub columns: Vec<ColumnDescriptor>,
    /// Set when the column metadata could not be read
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// List user tables, excluding the engine's own
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(schema::LIST_TABLES)?;
    let tables = stmt
        .query_map([schema::system_table_pattern()], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tables)
}

/// List a table's columns in their natural order
pub fn list_columns(conn: &Connection, table: &str) -> Result<Vec<ColumnDescriptor>> {
    let mut stmt = conn.prepare(schema::LIST_COLUMNS)?;
    let columns = stmt
        .query_map([table], |row| {
            let name: String = row.get(0)?;
            let declared: Option<String> = row.get(1)?;
            Ok(ColumnDescriptor::new(name, declared.unwrap_or_default()))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

/// Every table with its columns. Per-table metadata failures are reported
/// inline instead of failing the whole listing.
pub fn describe(conn: &Connection) -> Result<Vec<TableSummary>> {
    let summaries = list_tables(conn)?
        .into_iter()
        .map(|name| match list_columns(conn, &name) {
            Ok(columns) => TableSummary { name, columns, error: None },
            Err(e) => TableSummary { name, columns: Vec::new(), error: Some(e.to_string()) },
        })
        .collect();
    Ok(summaries)
}
