//! Record search
//!
//! Search runs in three passes over every user table:
//! - `Exact`: case-insensitive equality on identifier-likely columns
//! - `Partial`: case-insensitive substring on identifier-likely columns
//! - `FreeText`: case-insensitive substring on text-likely columns
//!
//! The first row found ends the search.

pub mod classify;
pub mod query;
pub mod engine;
pub mod format;
pub mod samples;

use rusqlite::types::ValueRef;
use serde::Serialize;
use crate::storage::ColumnDescriptor;

pub use engine::{Probe, Searcher, SkipReason, search_connection};
pub use format::{format_record, parse_record_text};
pub use query::{CandidateQuery, Comparison};

/// Text returned when no pass finds a row
pub const NOT_FOUND: &str = "Can't find details";

/// One sweep over all tables with a fixed column filter and comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    Exact,
    Partial,
    FreeText,
}

impl Pass {
    /// Passes in the order they run
    pub const ALL: [Pass; 3] = [Pass::Exact, Pass::Partial, Pass::FreeText];

    pub fn comparison(self) -> Comparison {
        match self {
            Pass::Exact => Comparison::Equals,
            Pass::Partial | Pass::FreeText => Comparison::Contains,
        }
    }

    /// Candidate columns for this pass, in table order
    pub fn select_columns(self, columns: &[ColumnDescriptor]) -> Vec<String> {
        columns
            .iter()
            .filter(|c| match self {
                Pass::Exact | Pass::Partial => c.is_identifier_likely(),
                Pass::FreeText => c.is_text_likely(),
            })
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Pass::Exact => "exact",
            Pass::Partial => "partial",
            Pass::FreeText => "free_text",
        }
    }
}

/// A scalar cell value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl FieldValue {
    /// Text rendering, `None` for null
    pub fn render(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Real(r) => Some(r.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Blob(bytes) => Some(
                bytes.iter().map(u8::to_string).collect::<Vec<_>>().join(","),
            ),
        }
    }

    /// Null, or nothing left after trimming
    pub fn is_blank(&self) -> bool {
        self.render().is_none_or(|s| s.trim().is_empty())
    }
}

impl From<ValueRef<'_>> for FieldValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => FieldValue::Null,
            ValueRef::Integer(i) => FieldValue::Integer(i),
            ValueRef::Real(r) => FieldValue::Real(r),
            ValueRef::Text(t) => FieldValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => FieldValue::Blob(b.to_vec()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// The single row a search settles on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub table: String,
    /// Columns in the order the database returned them
    pub fields: Vec<(String, FieldValue)>,
    pub pass: Pass,
}

impl MatchRecord {
    pub fn new(table: impl Into<String>, fields: Vec<(String, FieldValue)>, pass: Pass) -> Self {
        Self {
            table: table.into(),
            fields,
            pass,
        }
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(name, _)| name == column).map(|(_, v)| v)
    }
}

/// Result of a search: a record, or explicitly nothing
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(MatchRecord),
    NotFound,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn record(&self) -> Option<&MatchRecord> {
        match self {
            SearchOutcome::Found(record) => Some(record),
            SearchOutcome::NotFound => None,
        }
    }

    /// The caller-facing text: a formatted record or the not-found sentinel
    pub fn to_text(&self) -> String {
        match self {
            SearchOutcome::Found(record) => format_record(record),
            SearchOutcome::NotFound => NOT_FOUND.to_string(),
        }
    }
}
