//! CSV header parsing and normalization.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Column names read from a file's header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Normalized column names, in file order.
    pub columns: Vec<String>,
}

impl CsvHeaders {
    /// Normalize raw header fields and reject blank or repeated names.
    pub fn from_raw(path: &Path, raw: &[String], lowercase: bool) -> Result<Self> {
        let mut columns = Vec::with_capacity(raw.len());
        let mut seen = BTreeSet::new();
        for (index, field) in raw.iter().enumerate() {
            let mut name = normalize_header(field);
            if lowercase {
                name = name.to_lowercase();
            }
            if name.is_empty() {
                return Err(IngestError::EmptyColumnName {
                    path: path.to_path_buf(),
                    index,
                });
            }
            if !seen.insert(name.clone()) {
                return Err(IngestError::DuplicateColumnName {
                    path: path.to_path_buf(),
                    column: name,
                });
            }
            columns.push(name);
        }
        Ok(Self { columns })
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Trims whitespace and a stray byte-order mark.
pub fn normalize_header(value: &str) -> String {
    value.trim().trim_matches('\u{feff}').to_string()
}
