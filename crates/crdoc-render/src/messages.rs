//! User-facing text for every documentation failure
//!
//! This is the only place where a [`DocError`] becomes words a reader sees.

use crdoc_core::DocError;
use serde::Serialize;

/// What to show a reader when a CRD cannot be documented
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserMessage {
    pub title: &'static str,
    pub detail: String,
    /// Offer to submit the repository for documentation
    pub offer_submit: bool,
}

pub fn user_message(err: &DocError) -> UserMessage {
    match err {
        DocError::LookupMiss { key } => UserMessage {
            title: "Not yet documented",
            detail: format!(
                "Nothing has been documented for {} yet. Submit the repository to have its CRDs indexed.",
                key
            ),
            offer_submit: true,
        },
        DocError::Decode { message } => UserMessage {
            title: "Supplied file is not a valid CRD",
            detail: message.clone(),
            offer_submit: false,
        },
        DocError::NoStorageVersion { versions } => UserMessage {
            title: "This CRD has no documentable schema",
            detail: format!(
                "It declares {} versions but none of them is marked as the storage version.",
                versions
            ),
            offer_submit: false,
        },
        DocError::MissingStorageSchema { version } => UserMessage {
            title: "This CRD has no documentable schema",
            detail: format!("Specified storage version {} does not have a schema.", version),
            offer_submit: false,
        },
        DocError::SchemaNotFound => UserMessage {
            title: "This CRD has no documentable schema",
            detail: "Supplied CRD has no schema.".to_string(),
            offer_submit: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_offers_submit() {
        let msg = user_message(&DocError::lookup_miss("github.com/acme/widgets"));
        assert!(msg.offer_submit);
        assert!(msg.detail.contains("github.com/acme/widgets"));
    }

    #[test]
    fn test_resolution_failures_share_title() {
        let errors = [
            DocError::NoStorageVersion { versions: 3 },
            DocError::MissingStorageSchema {
                version: "v2".to_string(),
            },
            DocError::SchemaNotFound,
        ];

        for err in &errors {
            let msg = user_message(err);
            assert_eq!(msg.title, "This CRD has no documentable schema");
            assert!(!msg.offer_submit);
        }
        assert!(user_message(&errors[1]).detail.contains("v2"));
    }

    #[test]
    fn test_decode_message() {
        let msg = user_message(&DocError::decode("expected a mapping"));
        assert_eq!(msg.title, "Supplied file is not a valid CRD");
        assert_eq!(msg.detail, "expected a mapping");
    }
}
