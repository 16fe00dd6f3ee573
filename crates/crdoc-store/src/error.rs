//! Error types for lookup and cache operations

use thiserror::Error;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    // ============ Path Errors ============
    #[error("Invalid documentation path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    // ============ Cache Errors ============
    #[error("Cache error: {message}")]
    CacheError { message: String },

    #[error("Entry not found: {key}")]
    EntryNotFound { key: String },

    // ============ Config Errors ============
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    // ============ IO Errors ============
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

impl StoreError {
    pub fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        StoreError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_yaml::Error> for StoreError {
    fn from(e: serde_yaml::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::CacheError {
            message: e.to_string(),
        }
    }
}
