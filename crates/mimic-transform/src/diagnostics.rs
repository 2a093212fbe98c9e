//! Column-level diagnostics.

use crate::frame::Table;

/// Null count of every column, in table order.
pub fn null_counts(table: &Table) -> Vec<(String, usize)> {
    table
        .data
        .get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.null_count()))
        .collect()
}
