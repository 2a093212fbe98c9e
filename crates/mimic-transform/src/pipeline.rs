//! Ordered cleaning pipeline.
//!
//! Within one dataset the stage order is always
//! load → drop → normalize timestamps → cast → fill → export.
//! [`clean_table`] runs the in-memory part of that sequence; callers cannot
//! reorder it.

use std::path::Path;

use mimic_ingest::{IngestOptions, read_csv_table};
use mimic_model::{DatasetSpec, TimestampMode};
use tracing::{debug, info_span};

use crate::diagnostics::null_counts;
use crate::error::Result;
use crate::executors::{cast_columns, drop_columns, fill_missing, normalize_timestamps};
use crate::frame::Table;

/// Read a raw export into a table named after the file stem.
pub fn load(path: &Path, options: &IngestOptions) -> mimic_ingest::Result<Table> {
    let (data, _headers) = read_csv_table(path, options)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_uppercase())
        .unwrap_or_default();
    Ok(Table::new(name, data))
}

/// Apply a dataset spec to a loaded table.
///
/// Every declared and dropped column must be in the header before any stage runs.
pub fn clean_table(table: &Table, spec: &DatasetSpec) -> Result<Table> {
    let _span = info_span!("clean", dataset = %spec.name).entered();
    spec.check_header(&table.column_names())?;
    log_null_counts(table, "before cleaning");

    let dropped: Vec<&str> = spec.drop.iter().map(String::as_str).collect();
    let mut current = drop_columns(table, &dropped)?;
    current.name.clone_from(&spec.name);

    let timestamps = spec.timestamp_columns();
    for mode in [TimestampMode::Strict, TimestampMode::Coerce] {
        let columns: Vec<&str> = timestamps
            .iter()
            .filter(|(_, m)| *m == mode)
            .map(|(name, _)| *name)
            .collect();
        if !columns.is_empty() {
            current = normalize_timestamps(&current, &columns, mode)?;
        }
    }

    let current = cast_columns(&current, &spec.type_map())?;
    let current = fill_missing(&current, &spec.fill_map())?;

    log_null_counts(&current, "after cleaning");
    Ok(current)
}

fn log_null_counts(table: &Table, stage: &str) {
    for (column, nulls) in null_counts(table) {
        if nulls > 0 {
            debug!(table = %table.name, column = %column, nulls, stage, "null count");
        }
    }
}
