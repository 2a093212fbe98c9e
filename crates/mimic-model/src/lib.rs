//! Dataset spec model for the MIMIC table cleaner.
//!
//! A [`DatasetSpec`] is the static cleaning contract of one table: which
//! columns to drop, the semantic type of each declared column, how its
//! timestamps are parsed, and which sentinel replaces its missing values.

pub mod enums;
pub mod error;
pub mod spec;

pub use enums::{ColumnType, Sentinel, TimestampMode};
pub use error::{Result, SpecError};
pub use spec::{ColumnSpec, DatasetSpec, is_fixed_format_timestamp};

/// Fixed textual format every normalized timestamp is written in.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Far-future placeholder used for missing timestamps by convention.
pub const SENTINEL_TIMESTAMP: &str = "9999-12-31 00:00:00";

/// Label used for missing categorical values by convention.
pub const UNKNOWN_LABEL: &str = "Unknown";
