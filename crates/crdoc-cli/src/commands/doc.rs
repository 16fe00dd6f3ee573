//! Doc command - document a cached CRD by its repository path

use crdoc_store::DocPath;
use std::path::Path;

use super::{DocOptions, OutputFormat, emit_doc, lookup};
use crate::context::Context;
use crate::error::Result;

pub fn run(
    ctx: &Context,
    path: &str,
    format: OutputFormat,
    max_depth: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let doc_path = DocPath::parse(path)?;
    let key = doc_path.lookup_key();
    tracing::debug!(%key, "documenting cached CRD");

    let store = ctx.open_store()?;
    let bytes = lookup(&store, &key, format, output)?;

    emit_doc(
        &bytes,
        &DocOptions {
            format,
            max_depth: ctx.max_depth(max_depth),
            output,
            repo: Some(&doc_path.repo),
        },
    )
}
