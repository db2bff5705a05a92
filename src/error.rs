//! Error types for loading inputs

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading a spending dataset
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading a TOML configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}
