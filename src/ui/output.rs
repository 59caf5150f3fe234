use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

/// Heading for the results of `query`
pub fn header(query: &str) {
    println!("{} {}", Icons::CHIP, query.style(theme().query.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

/// The table a record came from
pub fn matched_table(table: &str) {
    println!(
        "{} {}: {}",
        Icons::INFO,
        "Table".style(theme().label.clone()),
        table.style(theme().table.clone())
    );
}

/// Title line for one table in a listing
pub fn table_heading(table: &str) {
    println!();
    println!("━{}━", table.style(theme().table.clone()));
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().label.clone()));
}

/// One `column: value` line of a record
pub fn field(name: &str, value: &str) {
    println!("  {}: {}", name.style(theme().column.clone()), value);
}

/// The sentinel line for a query with no match
pub fn not_found(sentinel: &str, query: &str) {
    let line = format!("{} ({})", sentinel, query);
    println!("{} {}", Icons::SEARCH, line.style(theme().not_found.clone()));
}

pub fn muted(text: &str) -> String {
    text.style(theme().muted.clone()).to_string()
}
