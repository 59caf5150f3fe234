//! Sample values for picking test queries
//!
//! Walks identifier-likely columns first, then text-likely ones, collecting
//! distinct non-blank values until `limit` is reached.

use std::collections::HashSet;
use rusqlite::Connection;
use crate::storage::introspect;
use crate::storage::schema::quote_identifier;
use super::{FieldValue, Pass};

/// Values read from a single column at most
const PER_COLUMN_LIMIT: usize = 50;

/// Collect up to `limit` distinct values. Unreadable tables and columns are
/// skipped.
pub fn sample_values(conn: &Connection, limit: usize) -> Vec<String> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();
    if limit == 0 {
        return found;
    }

    let tables = match introspect::list_tables(conn) {
        Ok(tables) => tables,
        Err(e) => {
            tracing::warn!("Could not list tables: {}", e);
            return found;
        }
    };

    // Identifier columns, then free text
    for pass in [Pass::Exact, Pass::FreeText] {
        for table in &tables {
            let Ok(columns) = introspect::list_columns(conn, table) else {
                continue;
            };
            for column in pass.select_columns(&columns) {
                match column_values(conn, table, &column) {
                    Ok(values) => {
                        for value in values {
                            if seen.insert(value.clone()) {
                                found.push(value);
                                if found.len() >= limit {
                                    return found;
                                }
                            }
                        }
                    }
                    Err(e) => tracing::debug!("Skipping {}.{}: {}", table, column, e),
                }
            }
        }
    }

    found
}

fn column_values(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<Vec<String>> {
    let column = quote_identifier(column);
    let sql = format!(
        "SELECT DISTINCT {column} FROM {} WHERE {column} IS NOT NULL AND TRIM({column}) <> '' LIMIT {PER_COLUMN_LIMIT}",
        quote_identifier(table)
    );
    let mut stmt = conn.prepare(&sql)?;
    let values = stmt
        .query_map([], |row| Ok(FieldValue::from(row.get_ref(0)?)))?
        .filter_map(|r| r.ok())
        .filter_map(|v| v.render())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE notes (body TEXT);
             INSERT INTO notes VALUES ('free text value');
             CREATE TABLE parts (pn TEXT, label TEXT);
             INSERT INTO parts VALUES ('PM660', 'pmic');
             INSERT INTO parts VALUES ('PM660', 'dup');
             INSERT INTO parts VALUES ('  ', 'blank');
             INSERT INTO parts VALUES ('SMB1350', 'charger');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_identifier_values_come_first() {
        let values = sample_values(&conn(), 2);
        assert_eq!(values, vec!["PM660".to_string(), "SMB1350".to_string()]);
    }

    #[test]
    fn test_falls_back_to_text_columns() {
        let values = sample_values(&conn(), 10);
        assert_eq!(values[..2], ["PM660".to_string(), "SMB1350".to_string()]);
        assert!(values.contains(&"free text value".to_string()));
        assert!(values.contains(&"charger".to_string()));
        // pn values are not repeated by the text pass
        assert_eq!(values.iter().filter(|v| *v == "PM660").count(), 1);
    }

    #[test]
    fn test_zero_limit() {
        assert!(sample_values(&conn(), 0).is_empty());
    }
}
