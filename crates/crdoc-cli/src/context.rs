//! Settings shared by every command

use crdoc_store::{CrdocConfig, SqliteStore};
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Configuration merged with command-line overrides
pub struct Context {
    pub config: CrdocConfig,
    pub cache_path: PathBuf,
}

impl Context {
    /// `--cache` wins over `cachePath` from the config file
    pub fn load(cache: Option<PathBuf>, config: Option<&Path>) -> Result<Self> {
        let config = match config {
            Some(path) if !path.exists() => {
                return Err(CliError::Usage {
                    message: format!("Config file not found: {}", path.display()),
                    help: None,
                });
            }
            Some(path) => CrdocConfig::load_from(path)?,
            None => CrdocConfig::load()?,
        };

        let cache_path = match cache {
            Some(path) => path,
            None => config.resolved_cache_path()?,
        };
        tracing::debug!(cache = %cache_path.display(), "using cache");

        Ok(Self { config, cache_path })
    }

    pub fn open_store(&self) -> Result<SqliteStore> {
        Ok(SqliteStore::open_at(&self.cache_path)?)
    }

    /// `--max-depth` wins over `maxDepth` from the config file
    pub fn max_depth(&self, flag: Option<usize>) -> usize {
        flag.unwrap_or(self.config.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_flags_override_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yaml");
        std::fs::write(&config_path, "cachePath: /nowhere/crds.db\nmaxDepth: 5\n").unwrap();

        let ctx = Context::load(None, Some(config_path.as_path())).unwrap();
        assert_eq!(ctx.cache_path, PathBuf::from("/nowhere/crds.db"));
        assert_eq!(ctx.max_depth(None), 5);
        assert_eq!(ctx.max_depth(Some(2)), 2);

        let cache = dir.path().join("other.db");
        let ctx = Context::load(Some(cache.clone()), Some(config_path.as_path())).unwrap();
        assert_eq!(ctx.cache_path, cache);
    }

    #[test]
    fn test_missing_config_is_usage_error() {
        let dir = TempDir::new().unwrap();
        let absent = dir.path().join("absent.yaml");
        let err = Context::load(None, Some(absent.as_path()))
            .err()
            .unwrap();
        assert_eq!(err.exit_code(), crate::exit_codes::USAGE_ERROR);
    }
}
