//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::flatten::FlatRecord;

/// Flat contributor record for table display
#[derive(Tabled)]
pub struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NUC")]
    nuc_code: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PARENT")]
    parent_id: String,
    #[tabled(rename = "ITEMS")]
    total_items: u64,
}

impl From<&FlatRecord> for RecordRow {
    fn from(record: &FlatRecord) -> Self {
        Self {
            id: record.id.clone(),
            nuc_code: record.nuc_code.clone().unwrap_or_default(),
            name: record.name.clone(),
            parent_id: record.parent_id.clone().unwrap_or_default(),
            total_items: record.total_items,
        }
    }
}

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No contributors found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

/// Format flat records as a table
pub fn format_records(records: &[FlatRecord]) -> String {
    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    format_table(&rows)
}
