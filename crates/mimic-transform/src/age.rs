//! Average patient age over a PATIENTS table.
//!
//! A patient's age is measured from `dob` to `dod`, or to a fixed reference
//! instant when the patient has no recorded death (null or the far-future
//! sentinel). Ages outside `(0, 120)` years are skipped: the de-identified
//! dumps shift the birth dates of the oldest patients by centuries.

use chrono::NaiveDateTime;
use mimic_model::SENTINEL_TIMESTAMP;
use serde::Serialize;
use tracing::debug;

use crate::error::{Result, TransformError};
use crate::frame::Table;
use crate::normalization::datetime::parse_timestamp;

/// Reference instant used for patients without a date of death.
pub const DEFAULT_AGE_REFERENCE: &str = "2008-01-01 00:00:00";

const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;

/// Aggregate of the qualifying ages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeSummary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

fn text_values<'a>(table: &'a Table, column: &str) -> Result<Vec<Option<&'a str>>> {
    let col = table
        .data
        .column(column)
        .map_err(|_| TransformError::ColumnNotFound {
            table: table.name.clone(),
            column: column.to_string(),
        })?;
    let values = col.str().map_err(|_| TransformError::NotText {
        column: column.to_string(),
        dtype: col.dtype().to_string(),
    })?;
    Ok(values.into_iter().collect())
}

/// Compute the average age in years over the `dob` and `dod` columns.
///
/// Rows whose `dob` (or non-empty `dod`) does not parse are skipped. Returns
/// `None` when no row qualifies.
pub fn average_age(table: &Table, reference: NaiveDateTime) -> Result<Option<AgeSummary>> {
    let dob = text_values(table, "dob")?;
    let dod = text_values(table, "dod")?;

    let mut ages = Vec::with_capacity(dob.len());
    let mut skipped = 0usize;
    for (birth, death) in dob.into_iter().zip(dod) {
        let Some(birth) = birth.and_then(parse_timestamp) else {
            skipped += 1;
            continue;
        };
        let end = match death.map(str::trim) {
            None | Some("") | Some(SENTINEL_TIMESTAMP) => Some(reference),
            Some(value) => parse_timestamp(value),
        };
        let Some(end) = end else {
            skipped += 1;
            continue;
        };

        #[allow(clippy::cast_precision_loss)]
        let age = (end - birth).num_seconds() as f64 / SECONDS_PER_YEAR;
        if age > 0.0 && age < 120.0 {
            ages.push(age);
        } else {
            skipped += 1;
        }
    }

    debug!(table = %table.name, qualifying = ages.len(), skipped, "computed patient ages");
    if ages.is_empty() {
        return Ok(None);
    }

    let sum: f64 = ages.iter().sum();
    let min = ages.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    #[allow(clippy::cast_precision_loss)]
    let mean = sum / ages.len() as f64;
    Ok(Some(AgeSummary {
        count: ages.len(),
        mean,
        min,
        max,
    }))
}
