//! Error types for the cleaning stages.

use mimic_model::{ColumnType, SpecError};
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while cleaning a table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A stage referenced a column the table does not have.
    #[error("column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    /// A value could not be parsed as a timestamp under strict mode.
    #[error("column '{column}' row {row}: '{value}' is not a recognizable timestamp")]
    Format {
        column: String,
        row: usize,
        value: String,
    },

    /// A value could not be coerced to its declared type.
    #[error("column '{column}' row {row}: '{value}' is not a valid {expected} value")]
    Type {
        column: String,
        row: usize,
        value: String,
        expected: ColumnType,
    },

    /// A column does not hold the text values a stage expects.
    #[error("column '{column}' has dtype {dtype}, expected text")]
    NotText { column: String, dtype: String },

    /// A fill sentinel cannot be stored in the column's current dtype.
    #[error("{sentinel_kind} sentinel {sentinel} cannot fill column '{column}' of dtype {dtype}")]
    SentinelMismatch {
        column: String,
        dtype: String,
        sentinel_kind: &'static str,
        sentinel: String,
    },

    #[error(transparent)]
    Spec(#[from] SpecError),

    /// Polars operation failed.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] PolarsError),
}

/// Result type for cleaning operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransformError::Format {
            column: "admittime".to_string(),
            row: 3,
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column 'admittime' row 3: 'yesterday' is not a recognizable timestamp"
        );

        let err = TransformError::Type {
            column: "valuenum".to_string(),
            row: 0,
            value: "high".to_string(),
            expected: ColumnType::Numeric,
        };
        assert_eq!(
            err.to_string(),
            "column 'valuenum' row 0: 'high' is not a valid numeric value"
        );
    }
}
