use tabled::{settings::Style, Table, Tabled};
use crate::storage::ColumnDescriptor;

#[derive(Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
pub struct ColumnRow {
    #[tabled(rename = "Column")]
    pub name: String,
    #[tabled(rename = "Type")]
    pub declared_type: String,
    #[tabled(rename = "Identifier")]
    pub identifier: &'static str,
    #[tabled(rename = "Text")]
    pub text: &'static str,
}

/// Two-column field/value table
#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<FieldRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(FieldRow {
            field: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn fields_table(fields: &[(String, String)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in fields {
        builder.add_row(label, value);
    }
    builder.build()
}

/// Column listing with classification marks
pub fn columns_table(columns: &[ColumnDescriptor]) -> String {
    if columns.is_empty() {
        return String::new();
    }
    let mark = |flag: bool| if flag { "yes" } else { "" };
    let rows: Vec<ColumnRow> = columns
        .iter()
        .map(|c| ColumnRow {
            name: c.name.clone(),
            declared_type: if c.declared_type.is_empty() { "-".to_string() } else { c.declared_type.clone() },
            identifier: mark(c.is_identifier_likely()),
            text: mark(c.is_text_likely()),
        })
        .collect();
    Table::new(&rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_is_empty_string() {
        assert!(fields_table(&[]).is_empty());
        assert!(columns_table(&[]).is_empty());
    }

    #[test]
    fn test_fields_table_contains_values() {
        let table = fields_table(&[("pn".to_string(), "PM660".to_string())]);
        assert!(table.contains("Field"));
        assert!(table.contains("PM660"));
    }

    #[test]
    fn test_columns_table_marks() {
        let table = columns_table(&[
            ColumnDescriptor::new("chip", "TEXT"),
            ColumnDescriptor::new("weight", "REAL"),
        ]);
        assert!(table.contains("chip"));
        assert!(table.contains("yes"));
        assert!(table.contains("REAL"));
    }
}
