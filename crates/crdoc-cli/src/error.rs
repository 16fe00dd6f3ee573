//! CLI error types with exit code handling
//!
//! Documentation failures are worded by [`crdoc_render::user_message`]; this
//! module only attaches diagnostics codes and exit codes to them.

use crdoc_core::DocError;
use crdoc_render::{RenderError, user_message};
use crdoc_store::StoreError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Nothing cached under the requested key
    #[error("{title}")]
    #[diagnostic(code(crdoc::cli::not_documented))]
    NotDocumented {
        title: String,
        #[help]
        help: Option<String>,
    },

    /// Bytes that do not decode as a CRD or listing
    #[error("{title}")]
    #[diagnostic(code(crdoc::cli::invalid_crd))]
    InvalidCrd {
        title: String,
        #[help]
        help: Option<String>,
    },

    /// CRD without a schema that can be documented
    #[error("{title}")]
    #[diagnostic(code(crdoc::cli::no_schema))]
    NoSchema {
        title: String,
        #[help]
        help: Option<String>,
    },

    /// Bad path, key or configuration supplied by the user
    #[error("{message}")]
    #[diagnostic(code(crdoc::cli::usage))]
    Usage {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Cache error: {message}")]
    #[diagnostic(code(crdoc::cli::cache))]
    Cache { message: String },

    #[error("Render error: {message}")]
    #[diagnostic(code(crdoc::cli::render))]
    Render { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(crdoc::cli::io))]
    Io { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(crdoc::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotDocumented { .. } => exit_codes::NOT_DOCUMENTED,
            CliError::InvalidCrd { .. } => exit_codes::INVALID_CRD,
            CliError::NoSchema { .. } => exit_codes::NO_SCHEMA,
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Cache { .. } => exit_codes::ERROR,
            CliError::Render { .. } => exit_codes::ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            help: None,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<DocError> for CliError {
    fn from(err: DocError) -> Self {
        let message = user_message(&err);
        let title = message.title.to_string();
        let help = Some(message.detail).filter(|d| !d.is_empty());

        match err {
            DocError::LookupMiss { .. } => CliError::NotDocumented { title, help },
            DocError::Decode { .. } => CliError::InvalidCrd { title, help },
            DocError::NoStorageVersion { .. }
            | DocError::MissingStorageSchema { .. }
            | DocError::SchemaNotFound => CliError::NoSchema { title, help },
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidPath { .. } | StoreError::InvalidConfig { .. } => {
                CliError::usage(err.to_string())
            }
            StoreError::EntryNotFound { .. } => CliError::NotDocumented {
                title: err.to_string(),
                help: Some("Run 'crdoc cache list' to see cached keys".to_string()),
            },
            StoreError::Io(e) => CliError::from(e),
            StoreError::CacheError { message } | StoreError::Serialization(message) => {
                CliError::Cache { message }
            }
        }
    }
}

impl From<RenderError> for CliError {
    fn from(err: RenderError) -> Self {
        CliError::Render {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::internal(err.to_string())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_errors_map_to_exit_codes() {
        let cases = [
            (DocError::lookup_miss("github.com/a/b"), exit_codes::NOT_DOCUMENTED),
            (DocError::decode("not yaml"), exit_codes::INVALID_CRD),
            (DocError::NoStorageVersion { versions: 2 }, exit_codes::NO_SCHEMA),
            (
                DocError::MissingStorageSchema {
                    version: "v1".to_string(),
                },
                exit_codes::NO_SCHEMA,
            ),
            (DocError::SchemaNotFound, exit_codes::NO_SCHEMA),
        ];

        for (err, code) in cases {
            assert_eq!(CliError::from(err).exit_code(), code);
        }
    }

    #[test]
    fn test_doc_error_uses_message_table() {
        let err = CliError::from(DocError::SchemaNotFound);
        assert_eq!(err.to_string(), "This CRD has no documentable schema");
        match err {
            CliError::NoSchema { help, .. } => {
                assert_eq!(help.as_deref(), Some("Supplied CRD has no schema."))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_store_errors_map_to_exit_codes() {
        let invalid = StoreError::invalid_path("x", "too short");
        assert_eq!(CliError::from(invalid).exit_code(), exit_codes::USAGE_ERROR);

        let missing = StoreError::EntryNotFound {
            key: "k".to_string(),
        };
        assert_eq!(CliError::from(missing).exit_code(), exit_codes::NOT_DOCUMENTED);

        let io = StoreError::Io(std::io::Error::other("disk"));
        assert_eq!(CliError::from(io).exit_code(), exit_codes::IO_ERROR);
    }
}
