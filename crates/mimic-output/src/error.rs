//! Error types for export.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while writing a cleaned table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Destination could not be created or written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The Parquet writer rejected the table.
    #[error("failed to encode {path} as Parquet: {source}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// A categorical column could not be converted for export.
    #[error("failed to prepare column '{column}' of table '{table}' for export: {source}")]
    Prepare {
        table: String,
        column: String,
        #[source]
        source: PolarsError,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, OutputError>;
