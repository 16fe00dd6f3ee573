//! CLI commands

pub mod cache;
pub mod doc;
pub mod org;
pub mod show;

use clap::ValueEnum;
use console::style;
use crdoc_core::{CrdParser, DocError, TreeBuilder, VersionResolver};
use crdoc_render::{DocPage, DocRenderer};
use crdoc_store::{CrdStore, RepoRef, SqliteStore, suggest_keys};
use std::path::Path;

use crate::display;
use crate::error::{CliError, Result};
use crate::util::write_output;

const MAX_SUGGESTIONS: usize = 3;

/// How documentation is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Indented field tree for the terminal
    #[default]
    Tree,
    /// The documentation tree as JSON
    Json,
    /// A standalone HTML page
    Html,
}

/// Where and how one CRD is documented
pub struct DocOptions<'a> {
    pub format: OutputFormat,
    pub max_depth: usize,
    pub output: Option<&'a Path>,
    /// Repository the CRD came from, shown in the page header
    pub repo: Option<&'a RepoRef>,
}

/// Decode, resolve, build and write the documentation of one CRD
pub fn emit_doc(bytes: &[u8], opts: &DocOptions<'_>) -> Result<()> {
    let manifest = CrdParser::parse(bytes).map_err(|e| doc_failure(e, opts.format, opts.output))?;
    let resolution =
        VersionResolver::resolve(&manifest).map_err(|e| doc_failure(e, opts.format, opts.output))?;

    let builder = TreeBuilder::new().with_max_depth(opts.max_depth);
    let root = if manifest.kind.is_empty() {
        builder.build(resolution.schema)
    } else {
        builder.build_named(resolution.schema, &manifest.kind)
    };
    if root.has_truncation() {
        tracing::info!(max_depth = opts.max_depth, "schema is deeper than the depth limit");
    }

    let mut page = DocPage::new(&manifest, &resolution, &root);
    if let Some(repo) = opts.repo {
        page = page.with_repo(repo.full_name(), repo.tag.clone());
    }

    let content = match opts.format {
        OutputFormat::Tree => {
            if opts.output.is_some() {
                console::set_colors_enabled(false);
            }
            display::doc_tree(&page)
        }
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&page)?),
        OutputFormat::Html => DocRenderer::new()?.render_doc(&page)?,
    };
    write_output(&content, opts.output)
}

/// Look up a key, turning a miss into a "not yet documented" failure
///
/// Cached keys close to the missing one are offered on stderr.
pub fn lookup(
    store: &SqliteStore,
    key: &str,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<Vec<u8>> {
    if let Some(bytes) = store.lookup(key)? {
        return Ok(bytes);
    }

    let known = store.keys()?;
    let suggestions = suggest_keys(key, &known, MAX_SUGGESTIONS);
    if !suggestions.is_empty() {
        eprintln!("{}", style("Did you mean:").yellow().bold());
        for suggestion in &suggestions {
            eprintln!("  {}", suggestion);
        }
    }

    Err(doc_failure(DocError::lookup_miss(key), format, output))
}

/// Convert a documentation failure into a CLI error
///
/// HTML output still gets a page describing the failure.
pub fn doc_failure(err: DocError, format: OutputFormat, output: Option<&Path>) -> CliError {
    tracing::debug!(error = %err, "documentation failed");
    if format == OutputFormat::Html {
        let page = DocRenderer::new().and_then(|renderer| renderer.render_error(&err));
        match page {
            Ok(html) => {
                if let Err(e) = write_output(&html, output) {
                    tracing::warn!("could not write error page: {}", e);
                }
            }
            Err(e) => tracing::warn!("could not render error page: {}", e),
        }
    }
    CliError::from(err)
}
