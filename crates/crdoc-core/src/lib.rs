//! crdoc Core - turn CustomResourceDefinitions into browsable field documentation
//!
//! This crate provides the pure, synchronous pipeline used by every crdoc surface:
//! - `CrdParser`: decode CRD bytes (YAML or JSON) into a `CrdManifest`
//! - `VersionResolver`: pick the single schema worth documenting
//! - `TreeBuilder`: convert that schema into a `DocNode` tree with unique anchors
//! - `CrdCatalog`: the per-repository listing of documented CRDs
//!
//! ```ignore
//! use crdoc_core::{CrdParser, TreeBuilder, resolve_version};
//!
//! let manifest = CrdParser::parse(bytes)?;
//! let schema = resolve_version(&manifest)?;
//! let tree = TreeBuilder::new().build_named(schema, &manifest.kind);
//! ```

pub mod anchor;
pub mod catalog;
pub mod error;
pub mod manifest;
pub mod parser;
pub mod resolve;
pub mod tree;

pub use anchor::AnchorIds;
pub use catalog::{CatalogEntry, CrdCatalog};
pub use error::{DocError, Result};
pub use manifest::{AdditionalProperties, CrdManifest, Items, SchemaNode, SchemaVersion, Validation};
pub use parser::CrdParser;
pub use resolve::{Resolution, VersionResolver, resolve_version};
pub use tree::{DEFAULT_MAX_DEPTH, DocNode, TreeBuilder, build_doc_tree};
