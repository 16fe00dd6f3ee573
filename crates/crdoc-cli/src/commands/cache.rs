//! Cache management commands

use console::style;
use crdoc_core::{CrdCatalog, CrdParser};
use crdoc_store::{DocPath, RepoRef};
use std::path::Path;

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::util::{format_size, truncate_hash};

/// What a cache key points at
#[derive(Debug, PartialEq)]
enum CacheKey {
    /// `host/org/repo[@tag]`: a JSON listing of the repository's CRDs
    Listing(RepoRef),
    /// `host/org/repo/path[@tag]`: one CRD document
    Document(DocPath),
}

impl CacheKey {
    fn parse(input: &str, default_host: &str) -> Result<Self> {
        match RepoRef::parse_with_host(input, default_host) {
            Ok(repo) => Ok(Self::Listing(repo)),
            Err(_) => Ok(Self::Document(DocPath::parse(input)?)),
        }
    }

    fn lookup_key(&self) -> String {
        match self {
            Self::Listing(repo) => repo.lookup_key(),
            Self::Document(path) => path.lookup_key(),
        }
    }
}

/// Store a CRD document or repository listing under a key
pub fn add(ctx: &Context, key: &str, file: &Path) -> Result<()> {
    let key = CacheKey::parse(key, &ctx.config.default_host)?;
    let bytes = std::fs::read(file).map_err(|e| CliError::Io {
        message: format!("{}: {}", file.display(), e),
    })?;

    match &key {
        CacheKey::Listing(_) => {
            CrdCatalog::parse(&bytes)?;
        }
        CacheKey::Document(_) => {
            CrdParser::parse(&bytes)?;
        }
    }

    let lookup_key = key.lookup_key();
    let mut store = ctx.open_store()?;
    let digest = store.put(&lookup_key, &bytes)?;

    println!(
        "{} Stored {} ({}, sha256:{})",
        style("✓").green().bold(),
        style(&lookup_key).cyan(),
        format_size(bytes.len() as u64),
        truncate_hash(&digest, 12)
    );
    Ok(())
}

/// List cached entries
pub fn list(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let entries = store.entries()?;

    if entries.is_empty() {
        println!("No cached entries.");
        println!();
        println!("Add one with: crdoc cache add <key> <file>");
        return Ok(());
    }

    println!("{:<70} {:>10}  {}", "KEY", "SIZE", "STORED");
    println!("{}", "-".repeat(100));

    for entry in &entries {
        let stored = entry
            .stored_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<70} {:>10}  {}",
            entry.key,
            format_size(entry.size),
            stored
        );
    }

    Ok(())
}

/// Remove one cached entry
pub fn remove(ctx: &Context, key: &str) -> Result<()> {
    let key = CacheKey::parse(key, &ctx.config.default_host)?.lookup_key();
    let mut store = ctx.open_store()?;
    store.remove(&key)?;

    println!("{} Removed {}", style("✓").green().bold(), style(&key).cyan());
    Ok(())
}

/// Show cache statistics
pub fn stats(ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let stats = store.stats()?;

    println!("{}", style("CRD cache").bold());
    println!("  Path:    {}", ctx.cache_path.display());
    println!("  Entries: {}", stats.entry_count);
    println!("  Size:    {}", format_size(stats.total_bytes));
    Ok(())
}
