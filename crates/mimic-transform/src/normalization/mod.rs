//! Value-level parsing used by the cleaning stages.
//!
//! - **datetime**: lenient timestamp parsing and fixed-format output
//! - **numeric**: integer, float and boolean parsing

pub mod datetime;
pub mod numeric;

pub use datetime::{format_timestamp, normalize_timestamp, parse_timestamp};
pub use numeric::{parse_bool, parse_f64, parse_integer};
