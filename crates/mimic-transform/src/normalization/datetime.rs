//! Timestamp parsing and formatting.
//!
//! Raw exports mix `YYYY-MM-DD HH:MM:SS`, ISO `T`-separated values, slashed
//! dates and date-only values. Everything that parses is rewritten in the
//! fixed `YYYY-MM-DD HH:MM:SS` form; date-only values land on midnight.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use mimic_model::{TIMESTAMP_FORMAT, is_fixed_format_timestamp};

/// Try to parse full datetime formats.
fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let formats = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d %H:%M",
        "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
        "%d-%b-%Y %H:%M",
        "%m/%d/%Y %H:%M:%S", // US, month first
        "%m/%d/%Y %H:%M",
    ];

    for fmt in &formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    None
}

/// Try to parse date-only formats.
fn try_parse_date(value: &str) -> Option<NaiveDate> {
    let formats = [
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d-%b-%Y",  // 15-Jan-2024
        "%m/%d/%Y",  // 01/15/2024
        "%Y%m%d",    // 20240115
        "%b %d, %Y", // Jan 15, 2024
        "%d %b %Y",  // 15 Jan 2024
    ];

    for fmt in &formats {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d);
        }
    }

    None
}

/// Parse a raw value as a point in time.
///
/// Returns `None` for blank or unrecognizable input. A trailing `Z` is
/// ignored; values are kept in their recorded wall-clock time.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);

    try_parse_datetime(trimmed).or_else(|| try_parse_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
}

/// Format a timestamp in the fixed output form.
pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse and reformat in one step.
///
/// Values already in the fixed output form are returned as they are.
pub fn normalize_timestamp(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if is_fixed_format_timestamp(trimmed) {
        return Some(trimmed.to_string());
    }
    parse_timestamp(trimmed).map(format_timestamp)
}
