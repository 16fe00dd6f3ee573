//! Version resolution
//!
//! A CRD may declare several API versions. Only one schema is documented:
//!
//! | versions | schema used                                              |
//! |----------|----------------------------------------------------------|
//! | none     | top-level `spec.validation`                              |
//! | one      | that version's schema, else top-level `spec.validation`  |
//! | many     | the `storage: true` version's schema, others ignored     |

use crate::error::{DocError, Result};
use crate::manifest::{CrdManifest, SchemaNode};

/// The schema chosen for documentation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    /// Name of the version the schema came from, `None` for the top-level schema
    pub version: Option<&'a str>,
    /// Root of the OpenAPI v3 schema
    pub schema: &'a SchemaNode,
}

impl<'a> Resolution<'a> {
    /// Version label to show on a page, falling back to the legacy `spec.version`
    pub fn display_version(&self, manifest: &'a CrdManifest) -> Option<&'a str> {
        self.version.or(manifest.version.as_deref())
    }
}

/// Selects the single effective schema of a manifest
pub struct VersionResolver;

impl VersionResolver {
    pub fn resolve(manifest: &CrdManifest) -> Result<Resolution<'_>> {
        let (version, validation) = match manifest.versions.as_slice() {
            [] => (None, manifest.validation.as_ref()),
            [only] => match &only.schema {
                Some(schema) => (Some(only.name.as_str()), Some(schema)),
                None => (None, manifest.validation.as_ref()),
            },
            versions => {
                let storage = manifest.storage_version().ok_or(DocError::NoStorageVersion {
                    versions: versions.len(),
                })?;
                let schema =
                    storage
                        .schema
                        .as_ref()
                        .ok_or_else(|| DocError::MissingStorageSchema {
                            version: storage.name.clone(),
                        })?;
                (Some(storage.name.as_str()), Some(schema))
            }
        };

        let schema = validation
            .and_then(|v| v.open_api_v3_schema.as_ref())
            .ok_or(DocError::SchemaNotFound)?;

        tracing::debug!(
            kind = %manifest.kind,
            version = version.unwrap_or("<top-level>"),
            "resolved documentation schema"
        );

        Ok(Resolution { version, schema })
    }
}

/// Resolve the root schema to document
pub fn resolve_version(manifest: &CrdManifest) -> Result<&SchemaNode> {
    VersionResolver::resolve(manifest).map(|r| r.schema)
}
