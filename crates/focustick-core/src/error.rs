//! Error types for focustick-core.
//!
//! The engine itself has no fatal path: storage saves are best-effort and
//! alerting failures stay inside the alerting adapters. These types cover
//! the fallible edges -- opening the database, loading and editing the
//! configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("no usable data directory")]
    NoDataDir,
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}
