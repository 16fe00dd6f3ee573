//! SQLite-backed CRD cache
//!
//! Features:
//! - WAL mode for concurrent readers
//! - One row per lookup key: raw bytes, sha256 digest, storage time
//! - Auto-recovery on corruption

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Key/value lookup of raw CRD bytes
///
/// `Ok(None)` means nothing is cached under `key`.
pub trait CrdStore {
    fn lookup(&self, key: &str) -> Result<Option<Vec<u8>>>;
}

/// Summary of a cached entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedEntry {
    pub key: String,
    pub size: u64,
    pub digest: String,
    pub stored_at: Option<DateTime<Utc>>,
}

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entry_count: u64,
    pub total_bytes: u64,
}

/// SQLite cache of CRD documents and repository listings
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create cache at default location
    pub fn open() -> Result<Self> {
        let path = Self::default_path()?;
        Self::open_at(&path)
    }

    /// Open or create cache at specific path
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let result = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )
        .map_err(StoreError::from)
        .and_then(|conn| {
            let mut store = Self { conn };
            store.init()?;
            Ok(store)
        });

        match result {
            Ok(store) => {
                tracing::debug!(path = %path.display(), "opened CRD cache");
                Ok(store)
            }
            Err(e) => {
                tracing::warn!("Cache corrupted, recreating: {}", e);
                if path.exists() {
                    std::fs::remove_file(path)?;
                }
                let mut store = Self {
                    conn: Connection::open(path)?,
                };
                store.init()?;
                Ok(store)
            }
        }
    }

    /// Open in-memory cache (for testing)
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn };
        store.init()?;
        Ok(store)
    }

    /// Get default cache path
    pub fn default_path() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir().ok_or_else(|| StoreError::CacheError {
            message: "Could not determine cache directory".to_string(),
        })?;
        Ok(cache_dir.join("crdoc").join("crds.db"))
    }

    /// Initialize database schema
    fn init(&mut self) -> Result<()> {
        self.conn.pragma_update(None, "journal_mode", "WAL")?;
        self.conn.pragma_update(None, "synchronous", "NORMAL")?;

        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                key TEXT PRIMARY KEY NOT NULL,
                data BLOB NOT NULL,
                digest TEXT NOT NULL,
                stored_at INTEGER NOT NULL
            );
            "#,
        )?;

        Ok(())
    }

    /// Store bytes under a key, replacing any previous entry
    ///
    /// Returns the sha256 digest of the stored bytes.
    pub fn put(&mut self, key: &str, data: &[u8]) -> Result<String> {
        let digest = hex::encode(Sha256::digest(data));
        self.conn.execute(
            r#"
            INSERT INTO entries (key, data, digest, stored_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(key) DO UPDATE SET
                data = excluded.data,
                digest = excluded.digest,
                stored_at = excluded.stored_at
            "#,
            params![key, data, digest, Utc::now().timestamp()],
        )?;
        tracing::debug!(key, bytes = data.len(), "stored cache entry");
        Ok(digest)
    }

    /// Remove an entry
    pub fn remove(&mut self, key: &str) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM entries WHERE key = ?1", [key])?;
        if removed == 0 {
            return Err(StoreError::EntryNotFound {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    /// All cached keys, sorted
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM entries ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    /// Summaries of all cached entries, sorted by key
    pub fn entries(&self) -> Result<Vec<CachedEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT key, length(data), digest, stored_at FROM entries ORDER BY key",
        )?;
        let entries = stmt
            .query_map([], |row| {
                let stored_at: i64 = row.get(3)?;
                Ok(CachedEntry {
                    key: row.get(0)?,
                    size: row.get::<_, i64>(1)? as u64,
                    digest: row.get(2)?,
                    stored_at: DateTime::from_timestamp(stored_at, 0),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let (entry_count, total_bytes): (i64, i64) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(length(data)), 0) FROM entries",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(CacheStats {
            entry_count: entry_count as u64,
            total_bytes: total_bytes as u64,
        })
    }
}

impl CrdStore for SqliteStore {
    fn lookup(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let data: Option<Vec<u8>> = self
            .conn
            .query_row("SELECT data FROM entries WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        match &data {
            Some(bytes) => tracing::debug!(key, bytes = bytes.len(), "cache hit"),
            None => tracing::debug!(key, "cache miss"),
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_put_and_lookup() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.put("github.com/acme/widgets/crd.yaml", b"kind: CustomResourceDefinition").unwrap();

        let data = store.lookup("github.com/acme/widgets/crd.yaml").unwrap();
        assert_eq!(data.as_deref(), Some(&b"kind: CustomResourceDefinition"[..]));
        assert!(store.lookup("github.com/acme/other").unwrap().is_none());
    }

    #[test]
    fn test_put_replaces_entry() {
        let mut store = SqliteStore::open_memory().unwrap();
        let first = store.put("k", b"one").unwrap();
        let second = store.put("k", b"two").unwrap();

        assert_ne!(first, second);
        assert_eq!(store.lookup("k").unwrap().as_deref(), Some(&b"two"[..]));
        assert_eq!(store.keys().unwrap(), vec!["k"]);
    }

    #[test]
    fn test_digest_is_sha256() {
        let mut store = SqliteStore::open_memory().unwrap();
        let digest = store.put("k", b"").unwrap();
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_remove() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.put("k", b"data").unwrap();
        store.remove("k").unwrap();

        assert!(store.lookup("k").unwrap().is_none());
        assert!(matches!(
            store.remove("k"),
            Err(StoreError::EntryNotFound { .. })
        ));
    }

    #[test]
    fn test_keys_entries_and_stats() {
        let mut store = SqliteStore::open_memory().unwrap();
        store.put("github.com/b/repo", b"{}").unwrap();
        store.put("github.com/a/repo/crd.yaml", b"12345").unwrap();

        assert_eq!(
            store.keys().unwrap(),
            vec!["github.com/a/repo/crd.yaml", "github.com/b/repo"]
        );

        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].size, 5);
        assert_eq!(entries[0].digest.len(), 64);
        assert!(entries[0].stored_at.is_some());

        let stats = store.stats().unwrap();
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.total_bytes, 7);
    }

    #[test]
    fn test_empty_stats() {
        let store = SqliteStore::open_memory().unwrap();
        assert_eq!(store.stats().unwrap(), CacheStats::default());
    }

    #[test]
    fn test_persists_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("crds.db");

        {
            let mut store = SqliteStore::open_at(&path).unwrap();
            store.put("k", b"v").unwrap();
        }

        let store = SqliteStore::open_at(&path).unwrap();
        assert_eq!(store.lookup("k").unwrap().as_deref(), Some(&b"v"[..]));
    }

    #[test]
    fn test_recovers_from_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crds.db");
        std::fs::write(&path, b"this is definitely not a sqlite database file").unwrap();

        let mut store = SqliteStore::open_at(&path).unwrap();
        store.put("k", b"v").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["k"]);
    }
}
