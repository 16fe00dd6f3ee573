//! Error taxonomy shared by every stage between a lookup and a rendered page

use thiserror::Error;

/// Why a CRD could not be documented
///
/// The tree builder has no variant here: depth overflow is reported through
/// `DocNode::truncated`, never as an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocError {
    #[error("no cached entry for '{key}'")]
    LookupMiss { key: String },

    #[error("not a valid CRD: {message}")]
    Decode { message: String },

    #[error("CRD declares {versions} versions but none is marked as the storage version")]
    NoStorageVersion { versions: usize },

    #[error("storage version '{version}' does not have a schema")]
    MissingStorageSchema { version: String },

    #[error("CRD has no openAPIV3Schema to document")]
    SchemaNotFound,
}

impl DocError {
    pub fn lookup_miss(key: impl Into<String>) -> Self {
        Self::LookupMiss { key: key.into() }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for DocError {
    fn from(e: serde_json::Error) -> Self {
        DocError::decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DocError>;
