//! Presenting a lookup result
//!
//! The result text carries no structure guarantee. A view first tries JSON,
//! then the record line format, and otherwise shows the text as-is.

use crate::search::{NOT_FOUND, parse_record_text};

#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    /// Text parsed as a JSON object
    Structured(Vec<(String, String)>),
    /// A rendered record block
    Record {
        table: String,
        fields: Vec<(String, String)>,
    },
    NotFound,
    /// Anything else, shown verbatim
    Raw(String),
}

impl ResultView {
    pub fn from_text(text: &str) -> Self {
        if text == NOT_FOUND {
            return ResultView::NotFound;
        }
        if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(text) {
            let fields = map
                .into_iter()
                .map(|(k, v)| {
                    let value = match v {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (k, value)
                })
                .collect();
            return ResultView::Structured(fields);
        }
        match parse_record_text(text) {
            Some((table, fields)) => ResultView::Record { table, fields },
            None => ResultView::Raw(text.to_string()),
        }
    }
}
