//! Repository catalog
//!
//! The entry cached under a repository key (`github.com/org/repo[@tag]`) is a
//! JSON object mapping each CRD's display name to its documentation path.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{DocError, Result};

/// One documented CRD of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub path: String,
}

/// All CRDs documented for one repository, sorted by name
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrdCatalog {
    entries: BTreeMap<String, String>,
}

impl CrdCatalog {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let entries: BTreeMap<String, String> = serde_json::from_slice(bytes)
            .map_err(|e| DocError::decode(format!("invalid CRD listing: {}", e)))?;
        Ok(Self { entries })
    }

    pub fn from_entries<I, N, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(n, p)| (n.into(), p.into()))
                .collect(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry> + '_ {
        self.entries.iter().map(|(name, path)| CatalogEntry {
            name: name.clone(),
            path: path.clone(),
        })
    }

    /// Documentation path of a CRD by display name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.entries)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_sorted() {
        let catalog = CrdCatalog::parse(
            br#"{"Issuer":"github.com/jetstack/cert-manager/deploy/issuer.yaml",
                 "Certificate":"github.com/jetstack/cert-manager/deploy/cert.yaml"}"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let names: Vec<String> = catalog.entries().map(|e| e.name).collect();
        assert_eq!(names, vec!["Certificate", "Issuer"]);
        assert_eq!(
            catalog.get("Issuer"),
            Some("github.com/jetstack/cert-manager/deploy/issuer.yaml")
        );
    }

    #[test]
    fn test_parse_invalid_catalog() {
        let err = CrdCatalog::parse(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, DocError::Decode { .. }));
    }

    #[test]
    fn test_json_roundtrip_via_parse() {
        let catalog = CrdCatalog::from_entries([("Widget", "github.com/acme/widgets/crd.yaml")]);
        let parsed = CrdCatalog::parse(&catalog.to_json().unwrap()).unwrap();
        assert_eq!(parsed, catalog);
        assert!(CrdCatalog::default().is_empty());
    }
}
