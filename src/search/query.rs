//! Candidate query builder
//!
//! Table and column names come from the catalog and are quoted into the
//! query text. The search term is only ever bound as a parameter, once per
//! candidate column.

use rusqlite::{Connection, params_from_iter};
use super::FieldValue;
use crate::storage::schema::quote_identifier;

/// How a candidate column is compared with the term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `UPPER(col) = UPPER(?)`
    Equals,
    /// `UPPER(col) LIKE UPPER(?)` with the term wrapped in `%`
    Contains,
}

impl Comparison {
    fn predicate(self, column: &str) -> String {
        let column = quote_identifier(column);
        match self {
            Comparison::Equals => format!("UPPER({column}) = UPPER(?)"),
            Comparison::Contains => format!("UPPER({column}) LIKE UPPER(?)"),
        }
    }

    fn bind_value(self, term: &str) -> String {
        match self {
            Comparison::Equals => term.to_string(),
            Comparison::Contains => format!("%{term}%"),
        }
    }
}

/// A single-row probe of one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    sql: String,
    params: Vec<String>,
}

impl CandidateQuery {
    /// Build a probe matching `term` against any of `columns`.
    /// Returns `None` when there are no columns to compare.
    pub fn build(table: &str, columns: &[String], comparison: Comparison, term: &str) -> Option<Self> {
        if columns.is_empty() {
            return None;
        }

        let predicates: Vec<String> = columns.iter().map(|c| comparison.predicate(c)).collect();
        let sql = format!(
            "SELECT * FROM {} WHERE {} LIMIT 1",
            quote_identifier(table),
            predicates.join(" OR ")
        );
        let params = vec![comparison.bind_value(term); columns.len()];
        Some(Self { sql, params })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Run the probe and return the first row, if any, as ordered fields
    pub fn first_row(&self, conn: &Connection) -> rusqlite::Result<Option<Vec<(String, FieldValue)>>> {
        let mut stmt = conn.prepare(&self.sql)?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let mut rows = stmt.query(params_from_iter(self.params.iter()))?;

        let Some(row) = rows.next()? else {
            return Ok(None);
        };
        let mut fields = Vec::with_capacity(names.len());
        for (i, name) in names.into_iter().enumerate() {
            fields.push((name, FieldValue::from(row.get_ref(i)?)));
        }
        Ok(Some(fields))
    }
}
