//! Column type, timestamp mode and sentinel enumerations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared semantic type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Point in time, normalized to `YYYY-MM-DD HH:MM:SS` text.
    Timestamp,
    /// Bounded label set; label order is irrelevant.
    Categorical,
    /// Tri-state flag: true, false or unknown (null).
    Boolean,
    /// 64-bit signed integer.
    Integer,
    /// 64-bit float.
    Numeric,
    /// Free text, left as loaded.
    Text,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Categorical => "categorical",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Numeric => "numeric",
            Self::Text => "text",
        }
    }

    /// Whether a sentinel of the given kind can stand in for this type.
    pub fn accepts(self, sentinel: &Sentinel) -> bool {
        matches!(
            (self, sentinel),
            (Self::Timestamp | Self::Categorical | Self::Text, Sentinel::Text(_))
                | (Self::Integer, Sentinel::Integer(_))
                | (Self::Numeric, Sentinel::Integer(_) | Sentinel::Numeric(_))
                | (Self::Boolean, Sentinel::Boolean(_))
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How unparseable timestamps are handled during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampMode {
    /// Any unparseable value fails the run.
    Strict,
    /// Unparseable values become null and are left to the fill step.
    Coerce,
}

impl TimestampMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Coerce => "coerce",
        }
    }
}

impl fmt::Display for TimestampMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed placeholder substituted for a missing value.
///
/// Deserialized untagged, so a TOML `fill = -1` is an integer sentinel,
/// `fill = -1.0` a numeric one and `fill = "Unknown"` a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sentinel {
    Integer(i64),
    Numeric(f64),
    Boolean(bool),
    Text(String),
}

impl Sentinel {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Numeric(_) => "numeric",
            Self::Boolean(_) => "boolean",
            Self::Text(_) => "text",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Integer sentinels widen to floats for numeric columns.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Numeric(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Text(value) => write!(f, "\"{value}\""),
        }
    }
}
