//! Show command - document a local CRD file

use std::path::Path;

use super::{DocOptions, OutputFormat, emit_doc};
use crate::context::Context;
use crate::error::{CliError, Result};

pub fn run(
    ctx: &Context,
    file: &Path,
    format: OutputFormat,
    max_depth: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let bytes = std::fs::read(file).map_err(|e| CliError::Io {
        message: format!("{}: {}", file.display(), e),
    })?;

    emit_doc(
        &bytes,
        &DocOptions {
            format,
            max_depth: ctx.max_depth(max_depth),
            output,
            repo: None,
        },
    )
}
