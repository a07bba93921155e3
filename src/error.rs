//! Error types for the few operations that can fail outright.
//!
//! Parsing and query resolution never fail (they degrade to empty results), so
//! these only cover startup concerns: reading a reference file and resolving
//! configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read reference file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid debounce interval '{value}': {reason}")]
    InvalidDebounce { value: String, reason: String },

    #[error("Invalid initialization options: {0}")]
    InitializationOptions(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Version {version} not newer than {current}")]
    StaleVersion { version: i32, current: i32 },
}
