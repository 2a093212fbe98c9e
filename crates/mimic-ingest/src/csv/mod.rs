//! CSV reading utilities.

mod header;
mod reader;

pub use header::CsvHeaders;
pub use reader::{IngestOptions, read_csv_table, validate_encoding};
