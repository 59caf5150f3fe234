//! Catalog queries and identifier handling

/// Tables whose names start with this prefix belong to the engine itself
pub const SYSTEM_TABLE_PREFIX: &str = "sqlite_";

/// SQL to list user tables in catalog order. `?1` is the `LIKE` pattern of
/// the names to leave out.
pub const LIST_TABLES: &str =
    "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE ?1";

/// SQL to list a table's columns with their declared type.
/// The table name is bound, never interpolated.
pub const LIST_COLUMNS: &str = "SELECT name, type FROM pragma_table_info(?1) ORDER BY cid";

/// `LIKE` pattern matching every system table
pub fn system_table_pattern() -> String {
    format!("{SYSTEM_TABLE_PREFIX}%")
}

/// Quote an introspected identifier for interpolation into query text.
///
/// Backticks always name an identifier. SQLite reads an unresolved
/// double-quoted name as a string literal, which backticks never are.
///
/// Only names read back from the catalog go through here; user input is
/// always bound as a parameter.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
