//! Dataset spec: the per-table cleaning contract.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::TIMESTAMP_FORMAT;
use crate::enums::{ColumnType, Sentinel, TimestampMode};
use crate::error::{Result, SpecError};

/// One declared column of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Parse mode, timestamp columns only. See [`ColumnSpec::timestamp_mode`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<TimestampMode>,
    /// Sentinel for missing values. `None` preserves nulls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Sentinel>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            mode: None,
            fill: None,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: TimestampMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Sentinel) -> Self {
        self.fill = Some(fill);
        self
    }

    /// Effective parse mode for a timestamp column.
    ///
    /// An explicit mode wins. Otherwise a column with a sentinel is coerced
    /// (its sentinel absorbs unparseable values) and a column without one is
    /// strict, so a bad value never turns into a silent null.
    pub fn timestamp_mode(&self) -> Option<TimestampMode> {
        if self.column_type != ColumnType::Timestamp {
            return None;
        }
        Some(self.mode.unwrap_or(if self.fill.is_some() {
            TimestampMode::Coerce
        } else {
            TimestampMode::Strict
        }))
    }
}

/// Static cleaning contract for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    /// Dataset name, e.g. `ADMISSIONS`.
    pub name: String,
    /// Input file name relative to the input directory.
    pub source: String,
    /// Output file name relative to the output directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Columns removed before any other stage.
    #[serde(default)]
    pub drop: Vec<String>,
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
}

impl DatasetSpec {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            output: None,
            description: None,
            drop: Vec::new(),
            columns: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn with_drop(mut self, column: impl Into<String>) -> Self {
        self.drop.push(column.into());
        self
    }

    /// Output file name, defaulting to `<NAME>.parquet`.
    pub fn output_file(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("{}.parquet", self.name))
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Timestamp columns with their effective parse mode, in declaration order.
    pub fn timestamp_columns(&self) -> Vec<(&str, TimestampMode)> {
        self.columns
            .iter()
            .filter_map(|c| c.timestamp_mode().map(|mode| (c.name.as_str(), mode)))
            .collect()
    }

    /// Columns whose type is established by casting.
    pub fn type_map(&self) -> Vec<(&str, ColumnType)> {
        self.columns
            .iter()
            .filter(|c| {
                matches!(
                    c.column_type,
                    ColumnType::Categorical
                        | ColumnType::Boolean
                        | ColumnType::Integer
                        | ColumnType::Numeric
                )
            })
            .map(|c| (c.name.as_str(), c.column_type))
            .collect()
    }

    /// Columns with a declared fill policy.
    pub fn fill_map(&self) -> Vec<(&str, &Sentinel)> {
        self.columns
            .iter()
            .filter_map(|c| c.fill.as_ref().map(|fill| (c.name.as_str(), fill)))
            .collect()
    }

    /// Check the dataset spec's internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SpecError::EmptyName);
        }
        let dropped: BTreeSet<&str> = self.drop.iter().map(String::as_str).collect();
        let mut seen = BTreeSet::new();
        for column in &self.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SpecError::DuplicateColumn {
                    dataset: self.name.clone(),
                    column: column.name.clone(),
                });
            }
            if dropped.contains(column.name.as_str()) {
                return Err(SpecError::DroppedAndDeclared {
                    dataset: self.name.clone(),
                    column: column.name.clone(),
                });
            }
            if column.mode.is_some() && column.column_type != ColumnType::Timestamp {
                return Err(SpecError::ModeOnNonTimestamp {
                    dataset: self.name.clone(),
                    column: column.name.clone(),
                });
            }
            if let Some(fill) = &column.fill {
                self.validate_fill(column, fill)?;
            }
        }
        Ok(())
    }

    fn validate_fill(&self, column: &ColumnSpec, fill: &Sentinel) -> Result<()> {
        if !column.column_type.accepts(fill) {
            return Err(SpecError::SentinelMismatch {
                dataset: self.name.clone(),
                column: column.name.clone(),
                column_type: column.column_type,
                sentinel_kind: fill.kind(),
                sentinel: fill.to_string(),
            });
        }
        if column.column_type == ColumnType::Timestamp
            && let Some(value) = fill.as_text()
            && !is_fixed_format_timestamp(value)
        {
            return Err(SpecError::InvalidTimestampSentinel {
                dataset: self.name.clone(),
                column: column.name.clone(),
                value: value.to_string(),
            });
        }
        Ok(())
    }

    /// Every declared and every dropped column must be in the header.
    pub fn check_header(&self, headers: &[String]) -> Result<()> {
        let present: BTreeSet<&str> = headers.iter().map(String::as_str).collect();
        let missing: Vec<String> = self
            .drop
            .iter()
            .chain(self.columns.iter().map(|c| &c.name))
            .filter(|name| !present.contains(name.as_str()))
            .cloned()
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SpecError::MissingColumns {
                dataset: self.name.clone(),
                columns: missing,
            })
        }
    }
}

/// Whether `value` is exactly in [`TIMESTAMP_FORMAT`], zero padding included.
pub fn is_fixed_format_timestamp(value: &str) -> bool {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string() == value)
        .unwrap_or(false)
}
