//! Error types
//!
//! The simulation itself never fails; only loading configuration can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
