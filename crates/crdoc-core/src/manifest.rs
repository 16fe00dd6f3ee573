//! CRD manifest representation
//!
//! A decoded CustomResourceDefinition reduced to what documentation needs:
//! identity, the legacy top-level validation block, and the declared versions
//! with their OpenAPI v3 schemas.

use std::collections::BTreeMap;

/// A decoded CustomResourceDefinition
///
/// Built fresh for every request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrdManifest {
    /// Full CRD name (e.g., "certificates.cert-manager.io")
    pub name: Option<String>,
    /// API group (e.g., "cert-manager.io")
    pub group: String,
    /// Resource kind (e.g., "Certificate")
    pub kind: String,
    /// Plural resource name
    pub plural: Option<String>,
    /// "Namespaced" or "Cluster"
    pub scope: Option<String>,
    /// Legacy single version (`spec.version`, v1beta1 only)
    pub version: Option<String>,
    /// Legacy top-level validation (`spec.validation`, v1beta1 only)
    pub validation: Option<Validation>,
    /// Declared API versions, in manifest order
    pub versions: Vec<SchemaVersion>,
}

impl CrdManifest {
    /// Get the version marked as storage
    pub fn storage_version(&self) -> Option<&SchemaVersion> {
        self.versions.iter().find(|v| v.storage)
    }
}

/// A single API version of a CRD
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaVersion {
    /// Version name (e.g., "v1", "v1beta1")
    pub name: String,
    /// Whether this version is served by the API server
    pub served: bool,
    /// Whether this is the storage version
    pub storage: bool,
    /// Whether this version is deprecated
    pub deprecated: bool,
    /// The `schema` block, if declared
    pub schema: Option<Validation>,
}

impl SchemaVersion {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            served: true,
            storage: false,
            deprecated: false,
            schema: None,
        }
    }

    /// Mark as the storage version
    pub fn storage(mut self) -> Self {
        self.storage = true;
        self
    }

    /// Attach an OpenAPI v3 schema
    pub fn with_schema(mut self, schema: SchemaNode) -> Self {
        self.schema = Some(Validation::new(schema));
        self
    }
}

/// A `validation`/`schema` block wrapping the OpenAPI v3 schema
///
/// Kept separate from [`SchemaNode`] so a block without `openAPIV3Schema`
/// stays distinguishable from no block at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Validation {
    pub open_api_v3_schema: Option<SchemaNode>,
}

impl Validation {
    pub fn new(schema: SchemaNode) -> Self {
        Self {
            open_api_v3_schema: Some(schema),
        }
    }
}

/// One node of an OpenAPI v3 structural schema
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SchemaNode {
    /// Type label (e.g., "object", "array", "string")
    pub type_: Option<String>,
    /// Human-readable description
    pub description: Option<String>,
    /// Format hint (e.g., "date-time", "int32")
    pub format: Option<String>,
    /// Regex pattern for strings
    pub pattern: Option<String>,
    /// Default value
    pub default: Option<serde_json::Value>,
    /// Whether null is allowed
    pub nullable: bool,
    /// Nested object properties, sorted by name
    pub properties: Option<BTreeMap<String, SchemaNode>>,
    /// Required property names
    pub required: Vec<String>,
    /// Allowed values; empty means no restriction
    pub enum_values: Vec<serde_json::Value>,
    /// Minimum value for numbers
    pub minimum: Option<f64>,
    /// Maximum value for numbers
    pub maximum: Option<f64>,
    /// Array item schema(s)
    pub items: Option<Items>,
    /// Additional properties for objects
    pub additional_properties: Option<AdditionalProperties>,
    /// `x-kubernetes-preserve-unknown-fields`
    pub x_preserve_unknown: bool,
    /// `x-kubernetes-int-or-string`
    pub x_int_or_string: bool,
    /// `x-kubernetes-embedded-resource`
    pub x_embedded_resource: bool,
}

impl SchemaNode {
    /// Create a node with only a type label
    pub fn typed(type_: &str) -> Self {
        Self {
            type_: Some(type_.to_string()),
            ..Default::default()
        }
    }

    /// Create a simple string node
    pub fn string() -> Self {
        Self::typed("string")
    }

    /// Create a simple integer node
    pub fn integer() -> Self {
        Self::typed("integer")
    }

    /// Create a simple boolean node
    pub fn boolean() -> Self {
        Self::typed("boolean")
    }

    /// Create an object node with nested properties
    pub fn object(properties: BTreeMap<String, SchemaNode>) -> Self {
        Self {
            type_: Some("object".to_string()),
            properties: Some(properties),
            ..Default::default()
        }
    }

    /// Create an array node with a single item schema
    pub fn array(items: SchemaNode) -> Self {
        Self {
            type_: Some("array".to_string()),
            items: Some(Items::Single(Box::new(items))),
            ..Default::default()
        }
    }

    /// Create a tuple-typed array node
    pub fn tuple(items: Vec<SchemaNode>) -> Self {
        Self {
            type_: Some("array".to_string()),
            items: Some(Items::Tuple(items)),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_additional_properties(mut self, additional: AdditionalProperties) -> Self {
        self.additional_properties = Some(additional);
        self
    }

    /// Check if a nested property is required
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// The `items` keyword of an array schema
#[derive(Debug, Clone, PartialEq)]
pub enum Items {
    /// Homogeneous list: every element matches one schema
    Single(Box<SchemaNode>),
    /// Tuple-typed list: one schema per position
    Tuple(Vec<SchemaNode>),
}

/// Additional properties configuration for objects
#[derive(Debug, Clone, PartialEq)]
pub enum AdditionalProperties {
    /// `additionalProperties: true`
    Allowed,
    /// `additionalProperties: false`
    Denied,
    /// Additional properties must match a schema
    Schema(Box<SchemaNode>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_lookup() {
        let mut nested = BTreeMap::new();
        nested.insert("replicas".to_string(), SchemaNode::integer());
        nested.insert("image".to_string(), SchemaNode::string());

        let spec = SchemaNode::object(nested).with_required(["replicas"]);

        assert!(spec.is_required("replicas"));
        assert!(!spec.is_required("image"));
        assert!(!spec.is_required("nonexistent"));
    }

    #[test]
    fn test_storage_version() {
        let manifest = CrdManifest {
            group: "example.com".to_string(),
            kind: "Test".to_string(),
            versions: vec![
                SchemaVersion {
                    deprecated: true,
                    ..SchemaVersion::new("v1beta1")
                },
                SchemaVersion::new("v1").storage(),
            ],
            ..Default::default()
        };

        assert_eq!(manifest.storage_version().unwrap().name, "v1");
        assert!(CrdManifest::default().storage_version().is_none());
    }
}
