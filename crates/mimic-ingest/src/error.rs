//! Error types for CSV ingestion.
//!
//! Every variant is a parse failure of the input file in the cleaner's
//! taxonomy: the dataset cannot be loaded and is left unprocessed.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a delimited export.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Encoding Errors ===
    /// File starts with a byte-order mark for an unsupported encoding.
    #[error("unsupported encoding {encoding} in {path} (expected UTF-8)")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    /// A record is not valid UTF-8.
    #[error("invalid UTF-8 in {path} at line {line}")]
    InvalidUtf8 { path: PathBuf, line: u64 },

    // === CSV Parsing Errors ===
    /// CSV file is empty or has no header.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// Header row has a blank column name.
    #[error("blank column name at position {index} in {path}")]
    EmptyColumnName { path: PathBuf, index: usize },

    /// Header row repeats a column name.
    #[error("duplicate column name '{column}' in {path}")]
    DuplicateColumnName { path: PathBuf, column: String },

    /// A record's field count differs from the header's.
    #[error("record at line {line} of {path} has {found} fields, expected {expected}")]
    RaggedRecord {
        path: PathBuf,
        line: u64,
        expected: u64,
        found: u64,
    },

    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
