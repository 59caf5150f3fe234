//! Column classification heuristics
//!
//! The keyword list is tuned to part-number databases and deliberately
//! broad: a false positive costs one extra predicate, a false negative makes
//! the record unfindable by the identifier passes.

/// Substrings that mark a column name as likely holding an identifier
const IDENTIFIER_KEYWORDS: &[&str] = &[
    "ic",
    "part",
    "model",
    "chip",
    "part_number",
    "partnumber",
    "number",
    "code",
];

/// Column names that are identifiers on their own
const IDENTIFIER_NAMES: &[&str] = &["pn", "sku"];

const IDENTIFIER_SUFFIX: &str = "_pn";

/// Does this column name look like it stores a part/model/chip identifier?
pub fn is_identifier_likely(column_name: &str) -> bool {
    let name = column_name.to_lowercase();
    IDENTIFIER_KEYWORDS.iter().any(|k| name.contains(k))
        || IDENTIFIER_NAMES.contains(&name.as_str())
        || name.ends_with(IDENTIFIER_SUFFIX)
}

/// Does this declared type hold character data? Undeclared counts as text.
pub fn is_text_likely(declared_type: &str) -> bool {
    let ty = declared_type.to_uppercase();
    ty.is_empty() || ty.contains("CHAR") || ty.contains("TEXT")
}
