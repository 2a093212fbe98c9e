#![deny(unsafe_code)]

//! Built-in dataset specs and spec loading.
//!
//! The five MIMIC-III exports the cleaner knows about ship as TOML files
//! under `specs/`, embedded at build time. Additional specs can be loaded
//! from disk and override a built-in of the same name.

pub mod error;
pub mod paths;
pub mod registry;

pub use crate::error::StandardsError;
pub use crate::paths::{DATA_DIR_ENV_VAR, default_data_dir};
pub use crate::registry::{SpecRegistry, builtin_spec, builtin_specs, load_spec_file, parse_spec};
