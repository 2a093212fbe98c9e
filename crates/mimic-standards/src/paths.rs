//! Input directory resolution.

use std::path::PathBuf;

/// Environment variable for overriding the directory raw CSV exports are read from.
pub const DATA_DIR_ENV_VAR: &str = "MIMIC_DATA_DIR";

/// Get the default input directory.
///
/// Resolution order:
/// 1. `MIMIC_DATA_DIR` environment variable
/// 2. the current directory
pub fn default_data_dir() -> PathBuf {
    if let Ok(root) = std::env::var(DATA_DIR_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(".")
}
