//! The table value passed between cleaning stages.
//!
//! A [`Table`] wraps a Polars DataFrame with the column metadata the stages
//! establish along the way: the semantic type each cast column ended up with
//! and the label set of each categorical column. Categorical columns stay
//! text in memory; the label set is the contract the export step turns into
//! an enum dtype.

use std::collections::{BTreeMap, BTreeSet};

use mimic_model::ColumnType;
use polars::prelude::DataFrame;

/// A named table with column metadata.
#[derive(Debug, Clone)]
pub struct Table {
    /// Table name, usually the dataset name (e.g. "ADMISSIONS").
    pub name: String,
    /// The table contents.
    pub data: DataFrame,
    types: BTreeMap<String, ColumnType>,
    labels: BTreeMap<String, BTreeSet<String>>,
}

impl Table {
    pub fn new(name: impl Into<String>, data: DataFrame) -> Self {
        Self {
            name: name.into(),
            data,
            types: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Returns the number of rows.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Returns the number of columns.
    pub fn width(&self) -> usize {
        self.data.width()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.data.column(name).is_ok()
    }

    /// The semantic type a cast established for a column, if any.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.types.get(name).copied()
    }

    /// The label set of a categorical column.
    pub fn labels(&self, name: &str) -> Option<&BTreeSet<String>> {
        self.labels.get(name)
    }

    pub(crate) fn set_type(&mut self, name: &str, column_type: ColumnType) {
        self.types.insert(name.to_string(), column_type);
    }

    pub(crate) fn set_labels(&mut self, name: &str, labels: BTreeSet<String>) {
        self.labels.insert(name.to_string(), labels);
    }

    /// Add a label to a categorical column's label set.
    ///
    /// Returns `false` when the column is not categorical.
    pub(crate) fn admit_label(&mut self, name: &str, label: &str) -> bool {
        match self.labels.get_mut(name) {
            Some(labels) => {
                labels.insert(label.to_string());
                true
            }
            None => false,
        }
    }

    pub(crate) fn forget_column(&mut self, name: &str) {
        self.types.remove(name);
        self.labels.remove(name);
    }
}
