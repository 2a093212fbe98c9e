//! CSV file reading into all-text Polars DataFrames.
//!
//! The file is streamed once with the `csv` crate. Every record must have as
//! many fields as the header and be valid UTF-8; blank lines are skipped.
//! Fields go straight into per-column string builders, blank ones as null.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use ::csv::{ErrorKind, ReaderBuilder, StringRecord};
use polars::prelude::{Column, DataFrame, IntoSeries, StringChunkedBuilder};
use tracing::debug;

use crate::error::{IngestError, Result};

use super::header::CsvHeaders;

/// Initial per-column builder capacity.
const BUILDER_CAPACITY: usize = 1024;

/// Options for loading a raw export.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestOptions {
    /// Lower-case header names (the official dumps ship `ROW_ID`, specs use `row_id`).
    pub lowercase_headers: bool,
}

impl IngestOptions {
    #[must_use]
    pub fn with_lowercase_headers(mut self, enable: bool) -> Self {
        self.lowercase_headers = enable;
        self
    }
}

/// Detect encoding and validate it's supported (UTF-8 only).
///
/// Checks for UTF-16 BOM markers which are not supported.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    // UTF-8 BOM is acceptable (stripped from the header)
    Ok(())
}

/// Reads a CSV file into a Polars DataFrame.
///
/// Every column is read as text and empty or whitespace-only fields load as
/// null. Returns both the DataFrame and the normalized headers.
pub fn read_csv_table(path: &Path, options: &IngestOptions) -> Result<(DataFrame, CsvHeaders)> {
    validate_encoding(path)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| map_csv_error(path, e))?;

    let raw_header: Vec<String> = reader
        .headers()
        .map_err(|e| map_csv_error(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    if raw_header.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let headers = CsvHeaders::from_raw(path, &raw_header, options.lowercase_headers)?;

    let mut builders: Vec<StringChunkedBuilder> = headers
        .columns
        .iter()
        .map(|name| StringChunkedBuilder::new(name.as_str().into(), BUILDER_CAPACITY))
        .collect();
    let mut record = StringRecord::new();
    let mut rows = 0usize;
    while reader
        .read_record(&mut record)
        .map_err(|e| map_csv_error(path, e))?
    {
        for (builder, field) in builders.iter_mut().zip(record.iter()) {
            if field.trim().is_empty() {
                builder.append_null();
            } else {
                builder.append_value(field);
            }
        }
        rows += 1;
    }

    let columns: Vec<Column> = builders
        .into_iter()
        .map(|builder| builder.finish().into_series().into())
        .collect();
    let df = DataFrame::new(columns).map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!(
        path = %path.display(),
        rows,
        columns = df.width(),
        "loaded CSV"
    );
    Ok((df, headers))
}

fn map_csv_error(path: &Path, error: ::csv::Error) -> IngestError {
    let line = error.position().map_or(0, ::csv::Position::line);
    match error.into_kind() {
        ErrorKind::Io(source) if source.kind() == std::io::ErrorKind::NotFound => {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        }
        ErrorKind::Io(source) => IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        },
        ErrorKind::Utf8 { .. } => IngestError::InvalidUtf8 {
            path: path.to_path_buf(),
            line,
        },
        ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => IngestError::RaggedRecord {
            path: path.to_path_buf(),
            line,
            expected: expected_len,
            found: len,
        },
        other => IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!("{other:?}"),
        },
    }
}
