//! Documentation tree construction
//!
//! Converts a resolved [`SchemaNode`] into a [`DocNode`] tree. Every node gets
//! an anchor id unique within the build; children are emitted in a fixed order:
//!
//! 1. object properties, sorted by name
//! 2. `items` (one child) or `items[0]`, `items[1]`, ... for tuple arrays
//! 3. `additionalProperties` when it carries a schema
//!
//! Recursion stops below the configured maximum depth: the node sitting past
//! the limit is still emitted, marked `truncated`, without children.

use serde::Serialize;
use serde_json::Value;

use crate::anchor::AnchorIds;
use crate::manifest::{AdditionalProperties, Items, SchemaNode};

/// Default recursion limit for [`TreeBuilder`]
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Key given to the root node when the caller does not name it
pub const ROOT_KEY: &str = "root";

/// Key of the child built from a single-schema `items`
pub const ITEMS_KEY: &str = "items";

/// Key of the child built from a schema-valued `additionalProperties`
pub const ADDITIONAL_PROPERTIES_KEY: &str = "additionalProperties";

/// One documented field or structural node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocNode {
    /// Field name, or a synthetic label such as `items` or `additionalProperties`
    pub key: String,
    /// Anchor token, unique within one build
    pub id: String,
    /// Dotted location from the root; empty for the root itself
    pub path: String,
    pub type_label: Option<String>,
    pub description: Option<String>,
    /// Whether the parent object lists this field as required
    pub required: bool,
    /// Names required at this level, sorted
    pub required_fields: Vec<String>,
    pub enum_values: Option<Vec<Value>>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub format: Option<String>,
    pub pattern: Option<String>,
    pub default: Option<Value>,
    pub nullable: bool,
    pub preserve_unknown_fields: bool,
    pub int_or_string: bool,
    pub embedded_resource: bool,
    /// `additionalProperties: true`
    pub additional_properties_allowed: bool,
    /// Set when the depth limit stopped recursion at this node
    pub truncated: bool,
    pub children: Vec<DocNode>,
}

impl DocNode {
    /// Total number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order traversal of this subtree
    pub fn iter(&self) -> DocNodeIter<'_> {
        DocNodeIter { stack: vec![self] }
    }

    /// Find a node by its dotted path
    pub fn find(&self, path: &str) -> Option<&DocNode> {
        self.iter().find(|n| n.path == path)
    }

    /// Number of levels below this node (0 for a leaf)
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Whether any node in this subtree was truncated
    pub fn has_truncation(&self) -> bool {
        self.iter().any(|n| n.truncated)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Pre-order iterator over a [`DocNode`] subtree
pub struct DocNodeIter<'a> {
    stack: Vec<&'a DocNode>,
}

impl<'a> Iterator for DocNodeIter<'a> {
    type Item = &'a DocNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Where a node sits in the tree being built
struct Slot {
    key: String,
    path: String,
    required: bool,
    depth: usize,
}

impl Slot {
    fn child(&self, key: String, required: bool) -> Slot {
        let path = if self.depth == 0 {
            key.clone()
        } else {
            format!("{}.{}", self.path, key)
        };
        Slot {
            key,
            path,
            required,
            depth: self.depth + 1,
        }
    }
}

/// Builds [`DocNode`] trees from schemas
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder {
    max_depth: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the deepest level that still gets children
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Build a tree whose root is labelled [`ROOT_KEY`]
    pub fn build(&self, root: &SchemaNode) -> DocNode {
        self.build_named(root, ROOT_KEY)
    }

    /// Build a tree with a caller-chosen root label (typically the CRD kind)
    pub fn build_named(&self, root: &SchemaNode, key: &str) -> DocNode {
        let mut ids = AnchorIds::new();
        self.build_with(root, key, &mut ids)
    }

    /// Build using an existing id allocator
    pub fn build_with(&self, root: &SchemaNode, key: &str, ids: &mut AnchorIds) -> DocNode {
        let slot = Slot {
            key: key.to_string(),
            path: String::new(),
            required: false,
            depth: 0,
        };
        self.node(root, slot, ids)
    }

    fn node(&self, schema: &SchemaNode, slot: Slot, ids: &mut AnchorIds) -> DocNode {
        let mut required_fields = schema.required.clone();
        required_fields.sort();
        required_fields.dedup();

        let mut doc = DocNode {
            id: ids.allocate(),
            key: slot.key.clone(),
            path: slot.path.clone(),
            type_label: schema.type_.clone(),
            description: schema.description.clone(),
            required: slot.required,
            required_fields,
            enum_values: (!schema.enum_values.is_empty()).then(|| schema.enum_values.clone()),
            minimum: schema.minimum,
            maximum: schema.maximum,
            format: schema.format.clone(),
            pattern: schema.pattern.clone(),
            default: schema.default.clone(),
            nullable: schema.nullable,
            preserve_unknown_fields: schema.x_preserve_unknown,
            int_or_string: schema.x_int_or_string,
            embedded_resource: schema.x_embedded_resource,
            additional_properties_allowed: false,
            truncated: false,
            children: Vec::new(),
        };

        if slot.depth > self.max_depth {
            tracing::debug!(path = %slot.path, depth = slot.depth, "depth limit reached, truncating");
            doc.truncated = true;
            return doc;
        }

        if let Some(properties) = &schema.properties {
            for (name, child) in properties {
                let child_slot = slot.child(name.clone(), schema.is_required(name));
                doc.children.push(self.node(child, child_slot, ids));
            }
        }

        match &schema.items {
            Some(Items::Single(item)) => {
                let child_slot = slot.child(ITEMS_KEY.to_string(), false);
                doc.children.push(self.node(item, child_slot, ids));
            }
            Some(Items::Tuple(entries)) => {
                for (index, entry) in entries.iter().enumerate() {
                    let child_slot = slot.child(format!("{}[{}]", ITEMS_KEY, index), false);
                    doc.children.push(self.node(entry, child_slot, ids));
                }
            }
            None => {}
        }

        match &schema.additional_properties {
            Some(AdditionalProperties::Allowed) => doc.additional_properties_allowed = true,
            Some(AdditionalProperties::Schema(nested)) => {
                let child_slot = slot.child(ADDITIONAL_PROPERTIES_KEY.to_string(), false);
                doc.children.push(self.node(nested, child_slot, ids));
            }
            Some(AdditionalProperties::Denied) | None => {}
        }

        doc
    }
}

/// Build a documentation tree with default settings
pub fn build_doc_tree(root: &SchemaNode) -> DocNode {
    TreeBuilder::new().build(root)
}
