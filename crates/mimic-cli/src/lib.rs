//! CLI library components for the MIMIC-III cleaner.

#![allow(missing_docs)]

pub mod logging;
pub mod pipeline;
pub mod types;
