//! Cleaning stages for clinical tables.
//!
//! This crate turns a raw, all-text table into a typed, null-handled one
//! according to its [`DatasetSpec`](mimic_model::DatasetSpec):
//!
//! - **frame**: the [`Table`] value passed between stages
//! - **executors**: `drop_columns`, `normalize_timestamps`, `cast_columns`, `fill_missing`
//! - **pipeline**: `load` and `clean_table`, which fixes the stage order
//! - **normalization**: timestamp and numeric value parsing
//! - **diagnostics**: per-column null counts
//! - **age**: average patient age over a PATIENTS table

pub mod age;
pub mod diagnostics;
pub mod error;
pub mod executors;
pub mod frame;
pub mod normalization;
pub mod pipeline;

pub use age::{AgeSummary, DEFAULT_AGE_REFERENCE, average_age};
pub use diagnostics::null_counts;
pub use error::{Result, TransformError};
pub use executors::{cast_columns, drop_columns, fill_missing, normalize_timestamps};
pub use frame::Table;
pub use pipeline::{clean_table, load};
