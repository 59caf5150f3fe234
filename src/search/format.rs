//! Record text rendering
//!
//! The rendered block is the caller-facing contract: a `Table:` line, then
//! one `column: value` line per non-blank column in the row's own order.

use super::MatchRecord;

const TABLE_PREFIX: &str = "Table: ";

/// Render a record as a flat text block
pub fn format_record(record: &MatchRecord) -> String {
    let mut lines = vec![format!("{TABLE_PREFIX}{}", record.table)];
    for (column, value) in &record.fields {
        if value.is_blank() {
            continue;
        }
        if let Some(text) = value.render() {
            lines.push(format!("{column}: {text}"));
        }
    }
    lines.join("\n")
}

/// Split a rendered block back into its table and `(column, value)` lines.
///
/// Returns `None` for text that does not start with a `Table:` line, such as
/// the not-found sentinel. Lines without a `: ` separator (multi-line values)
/// are appended to the previous value.
pub fn parse_record_text(text: &str) -> Option<(String, Vec<(String, String)>)> {
    let mut lines = text.lines();
    let table = lines.next()?.strip_prefix(TABLE_PREFIX)?.to_string();

    let mut fields: Vec<(String, String)> = Vec::new();
    for line in lines {
        match line.split_once(": ") {
            Some((column, value)) => fields.push((column.to_string(), value.to_string())),
            None => match fields.last_mut() {
                Some((_, value)) => {
                    value.push('\n');
                    value.push_str(line);
                }
                None => return None,
            },
        }
    }
    Some((table, fields))
}
