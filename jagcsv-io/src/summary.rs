//! Table shape summaries

use std::collections::BTreeMap;

use jagcsv_format::Table;
use serde::Serialize;

/// Row and field statistics for a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// Number of rows
    pub rows: usize,
    /// Rows whose fields are all absent or empty
    pub blank_rows: usize,
    /// Total fields across all rows
    pub fields: usize,
    /// Field count of the narrowest row
    pub min_fields: usize,
    /// Field count of the widest row
    pub max_fields: usize,
    /// True when every row has the same field count
    pub rectangular: bool,
    /// Rows per field count
    pub field_count_histogram: BTreeMap<usize, usize>,
}

/// Compute a [`TableSummary`]
pub fn summarize(table: &Table) -> TableSummary {
    let histogram = table.field_count_histogram();
    TableSummary {
        rows: table.len(),
        blank_rows: table.iter().filter(|row| row.is_blank()).count(),
        fields: table.iter().map(|row| row.len()).sum(),
        min_fields: histogram.keys().next().copied().unwrap_or(0),
        max_fields: table.max_field_count(),
        rectangular: histogram.len() <= 1,
        field_count_histogram: histogram,
    }
}
