//! Org command - list the CRDs documented for a repository

use crdoc_core::CrdCatalog;
use crdoc_render::{DocRenderer, OrgPage};
use crdoc_store::RepoRef;
use std::path::Path;

use super::{OutputFormat, doc_failure, lookup};
use crate::context::Context;
use crate::display;
use crate::error::Result;
use crate::util::write_output;

pub fn run(ctx: &Context, repo: &str, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let repo = RepoRef::parse_with_host(repo, &ctx.config.default_host)?;
    let key = repo.lookup_key();

    let store = ctx.open_store()?;
    let bytes = lookup(&store, &key, format, output)?;
    let catalog = CrdCatalog::parse(&bytes).map_err(|e| doc_failure(e, format, output))?;
    tracing::debug!(%key, crds = catalog.len(), "loaded repository listing");

    let page = OrgPage::new(repo.full_name(), repo.tag.clone(), &catalog);
    let content = match format {
        OutputFormat::Tree => {
            if output.is_some() {
                console::set_colors_enabled(false);
            }
            display::org_list(&page)
        }
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(&page)?),
        OutputFormat::Html => DocRenderer::new()?.render_org(&page)?,
    };
    write_output(&content, output)
}
