//! Error types for configuration loading

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading or validating the detection config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error for {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("parse error in {0}: {1}")]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid detection settings: {reason}")]
    Invalid { reason: String },
}
