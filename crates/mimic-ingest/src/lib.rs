//! Raw CSV ingestion.
//!
//! Loads one delimited export into a Polars [`DataFrame`](polars::prelude::DataFrame)
//! with every column read as text, so that types are established later by
//! the cleaning stages and nowhere else.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use mimic_ingest::{IngestOptions, read_csv_table};
//!
//! let (df, headers) = read_csv_table(Path::new("ADMISSIONS.csv"), &IngestOptions::default())?;
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use crate::csv::{CsvHeaders, IngestOptions, read_csv_table, validate_encoding};
