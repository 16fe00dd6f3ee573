//! Page models handed to the templates

use crdoc_core::{CatalogEntry, CrdCatalog, CrdManifest, DocNode, Resolution};
use serde::Serialize;

/// A single documented CRD
#[derive(Debug, Clone, Serialize)]
pub struct DocPage<'a> {
    /// `org/repo`, when the CRD came from a repository
    pub repo: Option<String>,
    pub tag: Option<String>,
    pub group: &'a str,
    pub version: Option<&'a str>,
    pub kind: &'a str,
    pub description: Option<&'a str>,
    pub root: &'a DocNode,
}

impl<'a> DocPage<'a> {
    pub fn new(manifest: &'a CrdManifest, resolution: &Resolution<'a>, root: &'a DocNode) -> Self {
        Self {
            repo: None,
            tag: None,
            group: &manifest.group,
            version: resolution.display_version(manifest),
            kind: &manifest.kind,
            description: resolution.schema.description.as_deref(),
            root,
        }
    }

    pub fn with_repo(mut self, repo: impl Into<String>, tag: Option<String>) -> Self {
        self.repo = Some(repo.into());
        self.tag = tag;
        self
    }
}

/// The CRDs documented for one repository
#[derive(Debug, Clone, Serialize)]
pub struct OrgPage {
    pub repo: String,
    pub tag: Option<String>,
    pub crds: Vec<CatalogEntry>,
    pub total: usize,
}

impl OrgPage {
    pub fn new(repo: impl Into<String>, tag: Option<String>, catalog: &CrdCatalog) -> Self {
        Self {
            repo: repo.into(),
            tag,
            crds: catalog.entries().collect(),
            total: catalog.len(),
        }
    }
}
