#![deny(unsafe_code)]

use std::path::PathBuf;

use mimic_model::SpecError;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read spec file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML spec {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid spec {origin}: {source}")]
    InvalidSpec {
        origin: String,
        #[source]
        source: SpecError,
    },

    #[error("unknown dataset '{name}' (available: {})", .available.join(", "))]
    UnknownDataset {
        name: String,
        available: Vec<String>,
    },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
