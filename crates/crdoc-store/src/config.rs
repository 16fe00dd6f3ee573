//! crdoc configuration
//!
//! Stored in `~/.config/crdoc/config.yaml`:
//!
//! ```yaml
//! cachePath: /var/cache/crdoc/crds.db
//! maxDepth: 64
//! defaultHost: github.com
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::key::DEFAULT_HOST;

/// crdoc configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrdocConfig {
    /// SQLite cache location (defaults to the user cache directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_path: Option<PathBuf>,

    /// Deepest schema level that is expanded in documentation trees
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Host used when a repository reference omits it
    #[serde(default = "default_host")]
    pub default_host: String,
}

fn default_max_depth() -> usize {
    crdoc_core::DEFAULT_MAX_DEPTH
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl Default for CrdocConfig {
    fn default() -> Self {
        Self {
            cache_path: None,
            max_depth: default_max_depth(),
            default_host: default_host(),
        }
    }
}

impl CrdocConfig {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default configuration path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| StoreError::InvalidConfig {
            message: "Could not determine config directory".to_string(),
        })?;
        Ok(config_dir.join("crdoc").join("config.yaml"))
    }

    /// Cache location, falling back to the platform default
    pub fn resolved_cache_path(&self) -> Result<PathBuf> {
        match &self.cache_path {
            Some(path) => Ok(path.clone()),
            None => crate::cache::SqliteStore::default_path(),
        }
    }
}
