//! Output generation for cleaned tables.
//!
//! Cleaned tables are written as Parquet, one file per dataset. Column types
//! established during cleaning are preserved; categorical columns are written
//! as enums over their label sets.

mod error;
mod parquet;

pub use error::{OutputError, Result};
pub use parquet::{export, to_export_frame};
