//! Lookup keys and documentation paths
//!
//! Keys are normalised repository paths, optionally suffixed with `@tag`:
//!
//! ```text
//! github.com/jetstack/cert-manager@v1.0.0                      repository listing
//! github.com/jetstack/cert-manager/deploy/crds.yaml@v1.0.0     single CRD document
//! ```

use url::Url;

use crate::error::{Result, StoreError};

/// Host assumed when a repository reference omits it
pub const DEFAULT_HOST: &str = "github.com";

const LOCAL_BASE: &str = "http://localhost/";

/// A repository at an optional tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub host: String,
    pub org: String,
    pub repo: String,
    pub tag: Option<String>,
}

impl RepoRef {
    pub fn new(org: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            org: org.into(),
            repo: repo.into(),
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into()).filter(|t: &String| !t.is_empty());
        self
    }

    /// Parse `org/repo[@tag]` or `host/org/repo[@tag]`
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_host(input, DEFAULT_HOST)
    }

    /// Parse, using `default_host` when the input omits the host
    pub fn parse_with_host(input: &str, default_host: &str) -> Result<Self> {
        let (path, tag) = split_tag(input.trim().trim_matches('/'));
        let segments = segments(path);

        let (host, org, repo) = match segments.as_slice() {
            [org, repo] => (default_host, *org, *repo),
            [host, org, repo] => (*host, *org, *repo),
            _ => {
                return Err(StoreError::invalid_path(
                    input,
                    "expected org/repo or host/org/repo",
                ));
            }
        };

        Ok(Self {
            host: host.to_string(),
            org: org.to_string(),
            repo: repo.to_string(),
            tag,
        })
    }

    /// `org/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }

    /// Key of the repository listing
    pub fn lookup_key(&self) -> String {
        with_tag(format!("{}/{}/{}", self.host, self.org, self.repo), &self.tag)
    }
}

/// A request for one CRD document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPath {
    pub repo: RepoRef,
    /// Path of the CRD file inside the repository
    pub file: String,
}

impl DocPath {
    /// Parse a request path or full URL
    ///
    /// Accepts `/github.com/org/repo/path/to/crd.yaml@tag`, the same without the
    /// leading slash, or `https://doc.example/github.com/org/repo/...`.
    /// Segments are percent-decoded, so `my crd.yaml` and `my%20crd.yaml`
    /// name the same document.
    pub fn parse(input: &str) -> Result<Self> {
        let url = request_url(input)?;
        let (path, tag) = split_tag(url.path());
        let tag = tag.map(|t| decode(&t, input)).transpose()?;
        let segments = segments(path)
            .into_iter()
            .map(|s| decode(s, input))
            .collect::<Result<Vec<_>>>()?;

        match segments.as_slice() {
            [host, org, repo, file @ ..] if !file.is_empty() => Ok(Self {
                repo: RepoRef {
                    host: host.clone(),
                    org: org.clone(),
                    repo: repo.clone(),
                    tag,
                },
                file: file.join("/"),
            }),
            _ => Err(StoreError::invalid_path(
                input,
                "expected host/org/repo/path-to-crd",
            )),
        }
    }

    /// Key of the cached CRD document
    pub fn lookup_key(&self) -> String {
        with_tag(
            format!(
                "{}/{}/{}/{}",
                self.repo.host, self.repo.org, self.repo.repo, self.file
            ),
            &self.repo.tag,
        )
    }
}

fn request_url(input: &str) -> Result<Url> {
    let input = input.trim();
    let parsed = if input.contains("://") {
        Url::parse(input)
    } else {
        Url::parse(LOCAL_BASE).and_then(|base| base.join(input.trim_start_matches('/')))
    };
    parsed.map_err(|e| StoreError::invalid_path(input, e.to_string()))
}

fn decode(segment: &str, input: &str) -> Result<String> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|e| StoreError::invalid_path(input, e.to_string()))
}

/// Split `path@tag`; the tag runs from the first `@` to the next one
fn split_tag(input: &str) -> (&str, Option<String>) {
    let mut parts = input.split('@');
    let path = parts.next().unwrap_or_default();
    let tag = parts
        .next()
        .map(|t| t.trim_matches('/'))
        .filter(|t| !t.is_empty())
        .map(String::from);
    (path, tag)
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn with_tag(key: String, tag: &Option<String>) -> String {
    match tag {
        Some(tag) => format!("{}@{}", key, tag),
        None => key,
    }
}
