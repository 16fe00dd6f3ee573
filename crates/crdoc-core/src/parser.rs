//! CRD decoder
//!
//! Decodes CustomResourceDefinition bytes (YAML or JSON) into a [`CrdManifest`].
//! Both the legacy `apiextensions.k8s.io/v1beta1` shape (`spec.validation`,
//! `spec.version`) and the `v1` shape (`spec.versions[].schema`) are accepted.
//!
//! Absent optional fields never fail decoding; they map to "not present".
//!
//! The document is loaded with `marked_yaml`, which puts no nesting limit on
//! block-style input, so deep schemas decode and depth is left to the tree
//! builder to bound.

use marked_yaml::Node;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

use crate::error::{DocError, Result};
use crate::manifest::{
    AdditionalProperties, CrdManifest, Items, SchemaNode, SchemaVersion, Validation,
};

const CRD_KIND: &str = "CustomResourceDefinition";

/// Decoder for CRD manifests
pub struct CrdParser;

impl CrdParser {
    /// Decode raw bytes into a manifest
    pub fn parse(bytes: &[u8]) -> Result<CrdManifest> {
        let content = std::str::from_utf8(bytes)
            .map_err(|e| DocError::decode(format!("document is not UTF-8: {}", e)))?;
        Self::parse_str(content)
    }

    /// Decode a CRD held in a string
    pub fn parse_str(content: &str) -> Result<CrdManifest> {
        if content.trim().is_empty() {
            return Err(DocError::decode("document is empty"));
        }
        let root = marked_yaml::parse_yaml(0, content)
            .map_err(|e| DocError::decode(e.to_string()))?;
        Self::parse_node(&root)
    }

    /// Decode from a loaded YAML node
    pub fn parse_node(root: &Node) -> Result<CrdManifest> {
        if root.as_mapping().is_none() {
            return Err(DocError::decode("document is not a mapping"));
        }

        if let Some(kind) = string(root, "kind") {
            if kind != CRD_KIND {
                return Err(DocError::decode(format!(
                    "expected {}, got {}",
                    CRD_KIND, kind
                )));
            }
        }

        let spec = field(root, "spec");
        let names = spec.and_then(|s| field(s, "names"));
        let spec_string = |key: &str| spec.and_then(|s| string(s, key));

        let versions = spec
            .and_then(|s| field(s, "versions"))
            .and_then(Node::as_sequence)
            .map(|seq| seq.iter().map(Self::parse_version).collect())
            .unwrap_or_default();

        Ok(CrdManifest {
            name: field(root, "metadata").and_then(|m| string(m, "name")),
            group: spec_string("group").unwrap_or_default(),
            kind: names.and_then(|n| string(n, "kind")).unwrap_or_default(),
            plural: names.and_then(|n| string(n, "plural")),
            scope: spec_string("scope"),
            version: spec_string("version"),
            validation: spec
                .and_then(|s| field(s, "validation"))
                .map(Self::parse_validation),
            versions,
        })
    }

    /// Parse a single CRD version
    fn parse_version(version: &Node) -> SchemaVersion {
        let flag = |key: &str, default: bool| boolean(version, key).unwrap_or(default);

        SchemaVersion {
            name: string(version, "name").unwrap_or_default(),
            served: flag("served", true),
            storage: flag("storage", false),
            deprecated: flag("deprecated", false),
            schema: field(version, "schema")
                .filter(|s| !is_null(s))
                .map(Self::parse_validation),
        }
    }

    /// Parse a `validation`/`schema` block
    fn parse_validation(block: &Node) -> Validation {
        Validation {
            open_api_v3_schema: field(block, "openAPIV3Schema")
                .filter(|s| s.as_mapping().is_some())
                .map(Self::parse_schema_node),
        }
    }

    /// Parse a single schema node (recursive)
    fn parse_schema_node(node: &Node) -> SchemaNode {
        let flag = |key: &str| boolean(node, key).unwrap_or(false);
        let number = |key: &str| field(node, key).and_then(|v| to_value(v).as_f64());

        let properties = field(node, "properties").and_then(Node::as_mapping).map(|map| {
            map.iter()
                .map(|(k, v)| (k.as_str().to_string(), Self::parse_schema_node(v)))
                .collect::<BTreeMap<_, _>>()
        });

        let required = field(node, "required")
            .and_then(Node::as_sequence)
            .map(|seq| {
                seq.iter()
                    .filter_map(Node::as_scalar)
                    .map(|s| s.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let enum_values = field(node, "enum")
            .and_then(Node::as_sequence)
            .map(|seq| seq.iter().map(to_value).collect())
            .unwrap_or_default();

        let items = field(node, "items").and_then(|v| {
            if v.as_mapping().is_some() {
                Some(Items::Single(Box::new(Self::parse_schema_node(v))))
            } else {
                v.as_sequence().map(|entries| {
                    Items::Tuple(entries.iter().map(Self::parse_schema_node).collect())
                })
            }
        });

        let additional_properties = field(node, "additionalProperties").and_then(|v| {
            if v.as_mapping().is_some() {
                return Some(AdditionalProperties::Schema(Box::new(
                    Self::parse_schema_node(v),
                )));
            }
            match v.as_scalar().map(|s| resolve_scalar(s.as_str())) {
                Some(Value::Bool(true)) => Some(AdditionalProperties::Allowed),
                Some(Value::Bool(false)) => Some(AdditionalProperties::Denied),
                _ => None,
            }
        });

        SchemaNode {
            type_: string(node, "type"),
            description: string(node, "description"),
            format: string(node, "format"),
            pattern: string(node, "pattern"),
            default: field(node, "default").map(to_value),
            nullable: flag("nullable"),
            properties,
            required,
            enum_values,
            minimum: number("minimum"),
            maximum: number("maximum"),
            items,
            additional_properties,
            x_preserve_unknown: flag("x-kubernetes-preserve-unknown-fields"),
            x_int_or_string: flag("x-kubernetes-int-or-string"),
            x_embedded_resource: flag("x-kubernetes-embedded-resource"),
        }
    }
}

/// Value of `key` when `node` is a mapping
fn field<'a>(node: &'a Node, key: &str) -> Option<&'a Node> {
    node.as_mapping()?.get_node(key)
}

/// Non-null scalar text of `key`
fn string(node: &Node, key: &str) -> Option<String> {
    field(node, key)
        .filter(|v| !is_null(v))
        .and_then(Node::as_scalar)
        .map(|s| s.as_str().to_string())
}

fn boolean(node: &Node, key: &str) -> Option<bool> {
    field(node, key).and_then(|v| to_value(v).as_bool())
}

fn is_null(node: &Node) -> bool {
    node.as_scalar()
        .is_some_and(|s| resolve_scalar(s.as_str()).is_null())
}

/// Literal value of a node, for `enum` and `default`
fn to_value(node: &Node) -> Value {
    if let Some(scalar) = node.as_scalar() {
        resolve_scalar(scalar.as_str())
    } else if let Some(seq) = node.as_sequence() {
        Value::Array(seq.iter().map(to_value).collect())
    } else if let Some(map) = node.as_mapping() {
        Value::Object(
            map.iter()
                .map(|(k, v)| (k.as_str().to_string(), to_value(v)))
                .collect(),
        )
    } else {
        Value::Null
    }
}

/// Resolve plain scalar text with the YAML 1.2 core schema
///
/// Quoting is not preserved by the loader, so `"1"` and `1` both resolve to
/// the number.
fn resolve_scalar(raw: &str) -> Value {
    match raw {
        "" | "~" | "null" | "Null" | "NULL" => return Value::Null,
        "true" | "True" | "TRUE" => return Value::Bool(true),
        "false" | "False" | "FALSE" => return Value::Bool(false),
        _ => {}
    }

    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }

    let numeric = raw.bytes().any(|b| b.is_ascii_digit())
        && raw
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if numeric {
        if let Some(number) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
            return Value::Number(number);
        }
    }

    Value::String(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;

    /// Follow a dotted path through `properties`
    fn nested<'a>(node: &'a SchemaNode, path: &str) -> Option<&'a SchemaNode> {
        path.split('.')
            .try_fold(node, |current, key| current.properties.as_ref()?.get(key))
    }

    /// A CRD whose schema nests `levels` objects below the root
    fn deep_crd(levels: usize) -> String {
        let mut doc = String::from(
            "kind: CustomResourceDefinition\nspec:\n  names:\n    kind: Deep\n  versions:\n    - name: v1\n      storage: true\n      schema:\n        openAPIV3Schema:\n",
        );
        let mut indent = 10;
        for _ in 0..levels {
            let pad = " ".repeat(indent);
            doc.push_str(&format!("{pad}type: object\n{pad}properties:\n{pad}  child:\n"));
            indent += 4;
        }
        doc.push_str(&format!("{}type: string\n", " ".repeat(indent)));
        doc
    }

    const V1_CRD: &str = r#"
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: certificates.cert-manager.io
spec:
  group: cert-manager.io
  scope: Namespaced
  names:
    kind: Certificate
    plural: certificates
  versions:
    - name: v1alpha2
      served: true
      storage: false
    - name: v1
      served: true
      storage: true
      schema:
        openAPIV3Schema:
          type: object
          description: A Certificate resource
          properties:
            spec:
              type: object
              required: [secretName]
              properties:
                secretName:
                  type: string
                  pattern: "^[a-z]+$"
                duration:
                  type: string
                  format: duration
                  default: 2160h
                usages:
                  type: array
                  items:
                    type: string
                    enum: [signing, digital signature]
                labels:
                  type: object
                  additionalProperties:
                    type: string
                extra:
                  type: object
                  additionalProperties: true
                  x-kubernetes-preserve-unknown-fields: true
                port:
                  x-kubernetes-int-or-string: true
                  minimum: 1
                  maximum: 65535
"#;

    const V1BETA1_CRD: &str = r#"
apiVersion: apiextensions.k8s.io/v1beta1
kind: CustomResourceDefinition
metadata:
  name: widgets.example.com
spec:
  group: example.com
  version: v1beta1
  names:
    kind: Widget
  validation:
    openAPIV3Schema:
      properties:
        spec:
          properties:
            size:
              type: integer
"#;

    #[test]
    fn test_parse_v1_crd() {
        let crd = CrdParser::parse_str(V1_CRD).unwrap();

        assert_eq!(crd.name.as_deref(), Some("certificates.cert-manager.io"));
        assert_eq!(crd.group, "cert-manager.io");
        assert_eq!(crd.kind, "Certificate");
        assert_eq!(crd.plural.as_deref(), Some("certificates"));
        assert_eq!(crd.versions.len(), 2);
        assert!(crd.validation.is_none());

        let storage = crd.storage_version().unwrap();
        assert_eq!(storage.name, "v1");
        let root = storage
            .schema
            .as_ref()
            .and_then(|s| s.open_api_v3_schema.as_ref())
            .unwrap();
        assert_eq!(root.type_.as_deref(), Some("object"));

        let spec = nested(root, "spec").unwrap();
        assert_eq!(spec.required, vec!["secretName"]);

        let secret = nested(spec, "secretName").unwrap();
        assert_eq!(secret.pattern.as_deref(), Some("^[a-z]+$"));

        let duration = nested(spec, "duration").unwrap();
        assert_eq!(duration.format.as_deref(), Some("duration"));
        assert_eq!(duration.default, Some(serde_json::json!("2160h")));
    }

    #[test]
    fn test_parse_items_and_additional_properties() {
        let crd = CrdParser::parse_str(V1_CRD).unwrap();
        let root = crd.versions[1]
            .schema
            .as_ref()
            .and_then(|s| s.open_api_v3_schema.as_ref())
            .unwrap();

        let usages = nested(root, "spec.usages").unwrap();
        match &usages.items {
            Some(Items::Single(item)) => {
                assert_eq!(item.type_.as_deref(), Some("string"));
                assert_eq!(item.enum_values.len(), 2);
            }
            other => panic!("expected single items, got {:?}", other),
        }

        let labels = nested(root, "spec.labels").unwrap();
        assert!(matches!(
            labels.additional_properties,
            Some(AdditionalProperties::Schema(_))
        ));

        let extra = nested(root, "spec.extra").unwrap();
        assert_eq!(
            extra.additional_properties,
            Some(AdditionalProperties::Allowed)
        );
        assert!(extra.x_preserve_unknown);

        let port = nested(root, "spec.port").unwrap();
        assert!(port.type_.is_none());
        assert!(port.x_int_or_string);
        assert_eq!(port.minimum, Some(1.0));
        assert_eq!(port.maximum, Some(65535.0));
    }

    #[test]
    fn test_parse_v1beta1_crd() {
        let crd = CrdParser::parse_str(V1BETA1_CRD).unwrap();

        assert_eq!(crd.version.as_deref(), Some("v1beta1"));
        assert!(crd.versions.is_empty());
        let root = crd
            .validation
            .as_ref()
            .and_then(|v| v.open_api_v3_schema.as_ref())
            .unwrap();
        assert!(root.type_.is_none());
        assert!(nested(root, "spec.size").is_some());
    }

    #[test]
    fn test_parse_tuple_items() {
        let crd = CrdParser::parse_str(
            r#"{"kind":"CustomResourceDefinition","spec":{"validation":{"openAPIV3Schema":
                {"type":"array","items":[{"type":"string"},{"type":"integer"},"bogus"]}}}}"#,
        )
        .unwrap();
        let root = crd.validation.unwrap().open_api_v3_schema.unwrap();

        match root.items {
            Some(Items::Tuple(entries)) => {
                assert_eq!(entries.len(), 3);
                assert_eq!(entries[1].type_.as_deref(), Some("integer"));
                assert_eq!(entries[2], SchemaNode::default());
            }
            other => panic!("expected tuple items, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_tolerates_missing_fields() {
        let crd = CrdParser::parse_str("kind: CustomResourceDefinition\n").unwrap();
        assert!(crd.name.is_none());
        assert!(crd.group.is_empty());
        assert!(crd.versions.is_empty());
        assert!(crd.validation.is_none());

        let crd = CrdParser::parse_str("spec:\n  versions:\n    - {}\n").unwrap();
        assert_eq!(crd.versions.len(), 1);
        assert!(crd.versions[0].served);
        assert!(!crd.versions[0].storage);
        assert!(crd.versions[0].schema.is_none());
    }

    #[test]
    fn test_parse_schema_block_without_openapi() {
        let crd = CrdParser::parse_str(
            "spec:\n  versions:\n    - name: v1\n      storage: true\n      schema: {}\n",
        )
        .unwrap();
        let schema = crd.versions[0].schema.as_ref().unwrap();
        assert!(schema.open_api_v3_schema.is_none());
    }

    #[test]
    fn test_parse_rejects_other_kinds() {
        let err = CrdParser::parse_str("kind: Deployment\n").unwrap_err();
        assert!(matches!(err, DocError::Decode { .. }));
        assert!(err.to_string().contains("Deployment"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            CrdParser::parse(b"- just\n- a list\n"),
            Err(DocError::Decode { .. })
        ));
        assert!(matches!(
            CrdParser::parse(b"{not: [valid"),
            Err(DocError::Decode { .. })
        ));
        assert!(matches!(CrdParser::parse(b""), Err(DocError::Decode { .. })));
    }

    #[test]
    fn test_parse_deep_schema() {
        let crd = CrdParser::parse_str(&deep_crd(100)).unwrap();
        let root = crd
            .storage_version()
            .and_then(|v| v.schema.as_ref())
            .and_then(|s| s.open_api_v3_schema.as_ref())
            .unwrap();

        let path = vec!["child"; 100].join(".");
        let leaf = nested(root, &path).unwrap();
        assert_eq!(leaf.type_.as_deref(), Some("string"));

        let tree = TreeBuilder::new().build_named(root, &crd.kind);
        assert!(tree.has_truncation());
        assert_eq!(tree.height(), 65);
        assert_eq!(tree.node_count(), 66);
    }
}
