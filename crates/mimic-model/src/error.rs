use thiserror::Error;

use crate::enums::ColumnType;

/// Violations of a dataset spec's own rules or of its header invariant.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("dataset spec has an empty name")]
    EmptyName,

    #[error("dataset {dataset}: column '{column}' is declared more than once")]
    DuplicateColumn { dataset: String, column: String },

    #[error("dataset {dataset}: column '{column}' is both declared and dropped")]
    DroppedAndDeclared { dataset: String, column: String },

    #[error(
        "dataset {dataset}: {sentinel_kind} sentinel {sentinel} cannot fill {column_type} column '{column}'"
    )]
    SentinelMismatch {
        dataset: String,
        column: String,
        column_type: ColumnType,
        sentinel_kind: &'static str,
        sentinel: String,
    },

    #[error(
        "dataset {dataset}: timestamp sentinel '{value}' for column '{column}' is not in YYYY-MM-DD HH:MM:SS form"
    )]
    InvalidTimestampSentinel {
        dataset: String,
        column: String,
        value: String,
    },

    #[error("dataset {dataset}: parse mode set on non-timestamp column '{column}'")]
    ModeOnNonTimestamp { dataset: String, column: String },

    #[error("dataset {dataset}: columns missing from header: {}", .columns.join(", "))]
    MissingColumns {
        dataset: String,
        columns: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, SpecError>;
