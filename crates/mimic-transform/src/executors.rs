//! Cleaning stage functions.
//!
//! Each stage takes a table by reference and returns a new one; the input is
//! never mutated. The stages are meant to run in the order fixed by
//! [`clean_table`](crate::pipeline::clean_table).

use std::collections::BTreeSet;

use mimic_model::{ColumnType, Sentinel, TimestampMode};
use polars::prelude::*;
use tracing::{debug, warn};

use crate::error::{Result, TransformError};
use crate::frame::Table;
use crate::normalization::datetime::normalize_timestamp;
use crate::normalization::numeric::{parse_bool, parse_f64, parse_integer};

fn text_column<'a>(table: &'a Table, column: &str) -> Result<&'a StringChunked> {
    let col = table
        .data
        .column(column)
        .map_err(|_| TransformError::ColumnNotFound {
            table: table.name.clone(),
            column: column.to_string(),
        })?;
    col.str().map_err(|_| TransformError::NotText {
        column: column.to_string(),
        dtype: col.dtype().to_string(),
    })
}

/// Remove columns that carry no analytical value.
pub fn drop_columns(table: &Table, columns: &[&str]) -> Result<Table> {
    let mut out = table.clone();
    for &column in columns {
        if !out.has_column(column) {
            return Err(TransformError::ColumnNotFound {
                table: table.name.clone(),
                column: column.to_string(),
            });
        }
        out.data = out.data.drop(column)?;
        out.forget_column(column);
    }
    if !columns.is_empty() {
        debug!(table = %table.name, dropped = ?columns, "dropped columns");
    }
    Ok(out)
}

/// Parse each value of the named columns as a timestamp and rewrite it in
/// the fixed `YYYY-MM-DD HH:MM:SS` form.
///
/// Under [`TimestampMode::Strict`] the first unparseable value fails the
/// stage with [`TransformError::Format`]. Under [`TimestampMode::Coerce`]
/// unparseable values become null. Nulls stay null in both modes.
pub fn normalize_timestamps(
    table: &Table,
    columns: &[&str],
    mode: TimestampMode,
) -> Result<Table> {
    let mut out = table.clone();
    for &column in columns {
        let values = text_column(table, column)?;
        let mut builder = StringChunkedBuilder::new(column.into(), values.len());
        let mut coerced = 0usize;

        for (row, value) in values.into_iter().enumerate() {
            let Some(raw) = value.filter(|v| !v.trim().is_empty()) else {
                builder.append_null();
                continue;
            };
            match normalize_timestamp(raw) {
                Some(ts) => builder.append_value(ts),
                None => match mode {
                    TimestampMode::Strict => {
                        return Err(TransformError::Format {
                            column: column.to_string(),
                            row,
                            value: raw.to_string(),
                        });
                    }
                    TimestampMode::Coerce => {
                        coerced += 1;
                        builder.append_null();
                    }
                },
            }
        }

        out.data.with_column(builder.finish().into_series())?;
        out.set_type(column, ColumnType::Timestamp);
        if coerced > 0 {
            warn!(
                table = %table.name,
                column,
                coerced,
                "unparseable timestamps coerced to null"
            );
        }
    }
    Ok(out)
}

/// Reinterpret the named columns as their declared types.
///
/// Categorical columns keep their text values and record the distinct
/// non-null values as the column's label set. Boolean, integer and numeric
/// columns are parsed; any value that does not parse fails the stage with
/// [`TransformError::Type`]. Timestamp and text columns are left as text.
pub fn cast_columns(table: &Table, type_map: &[(&str, ColumnType)]) -> Result<Table> {
    let mut out = table.clone();
    for &(column, column_type) in type_map {
        let values = text_column(table, column)?;
        match column_type {
            ColumnType::Categorical => {
                let labels: BTreeSet<String> = values
                    .into_iter()
                    .flatten()
                    .map(str::to_string)
                    .collect();
                debug!(table = %table.name, column, labels = labels.len(), "categorical labels");
                out.set_labels(column, labels);
            }
            ColumnType::Boolean => {
                let parsed: BooleanChunked = parse_each(values, column, column_type, parse_bool)?;
                out.data.with_column(parsed.with_name(column.into()).into_series())?;
            }
            ColumnType::Integer => {
                let parsed: Int64Chunked = parse_each(values, column, column_type, parse_integer)?;
                out.data.with_column(parsed.with_name(column.into()).into_series())?;
            }
            ColumnType::Numeric => {
                let parsed: Float64Chunked = parse_each(values, column, column_type, parse_f64)?;
                out.data.with_column(parsed.with_name(column.into()).into_series())?;
            }
            ColumnType::Timestamp | ColumnType::Text => {}
        }
        out.set_type(column, column_type);
    }
    Ok(out)
}

/// Parse every non-null value, failing on the first one that does not parse.
fn parse_each<T, C>(
    values: &StringChunked,
    column: &str,
    expected: ColumnType,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<C>
where
    C: FromIterator<Option<T>>,
{
    let mut parsed = Vec::with_capacity(values.len());
    for (row, value) in values.into_iter().enumerate() {
        match value {
            None => parsed.push(None),
            Some(raw) => match parse(raw) {
                Some(v) => parsed.push(Some(v)),
                None => {
                    return Err(TransformError::Type {
                        column: column.to_string(),
                        row,
                        value: raw.to_string(),
                        expected,
                    });
                }
            },
        }
    }
    Ok(parsed.into_iter().collect())
}

/// Replace every null in the named columns with the column's sentinel.
///
/// A text sentinel filling a categorical column is first admitted into the
/// column's label set. Columns not named keep their nulls.
pub fn fill_missing(table: &Table, fill_map: &[(&str, &Sentinel)]) -> Result<Table> {
    let mut out = table.clone();
    for &(column, sentinel) in fill_map {
        let col = table
            .data
            .column(column)
            .map_err(|_| TransformError::ColumnNotFound {
                table: table.name.clone(),
                column: column.to_string(),
            })?;
        let missing = col.null_count();
        let mismatch = || TransformError::SentinelMismatch {
            column: column.to_string(),
            dtype: col.dtype().to_string(),
            sentinel_kind: sentinel.kind(),
            sentinel: sentinel.to_string(),
        };

        let filled: Series = match col.dtype() {
            DataType::String => {
                let fill = sentinel.as_text().ok_or_else(mismatch)?;
                out.admit_label(column, fill);
                col.str()?
                    .into_iter()
                    .map(|v| Some(v.unwrap_or(fill)))
                    .collect::<StringChunked>()
                    .into_series()
            }
            DataType::Int64 => {
                let fill = sentinel.as_i64().ok_or_else(mismatch)?;
                col.i64()?
                    .into_iter()
                    .map(|v| Some(v.unwrap_or(fill)))
                    .collect::<Int64Chunked>()
                    .into_series()
            }
            DataType::Float64 => {
                let fill = sentinel.as_f64().ok_or_else(mismatch)?;
                col.f64()?
                    .into_iter()
                    .map(|v| Some(v.unwrap_or(fill)))
                    .collect::<Float64Chunked>()
                    .into_series()
            }
            DataType::Boolean => {
                let fill = sentinel.as_bool().ok_or_else(mismatch)?;
                col.bool()?
                    .into_iter()
                    .map(|v| Some(v.unwrap_or(fill)))
                    .collect::<BooleanChunked>()
                    .into_series()
            }
            _ => return Err(mismatch()),
        };

        out.data.with_column(filled.with_name(column.into()))?;
        debug!(table = %table.name, column, filled = missing, sentinel = %sentinel, "filled missing values");
    }
    Ok(out)
}
