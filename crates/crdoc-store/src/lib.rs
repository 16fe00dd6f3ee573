//! crdoc Store - where CRD documentation comes from
//!
//! - **Keys**: normalise request paths (`github.com/org/repo/path@tag`) into
//!   lookup keys for repositories and single CRD documents
//! - **Lookup**: the [`CrdStore`] trait, and [`SqliteStore`], a SQLite
//!   key/value cache holding raw CRD bytes and repository listings
//! - **Config**: the `~/.config/crdoc/config.yaml` file
//!
//! ```rust,no_run
//! use crdoc_store::{CrdStore, DocPath, SqliteStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteStore::open()?;
//! let path = DocPath::parse("/github.com/jetstack/cert-manager/deploy/crd.yaml@v1.0.0")?;
//! if let Some(bytes) = store.lookup(&path.lookup_key())? {
//!     println!("{} bytes cached", bytes.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod suggest;

pub use cache::{CacheStats, CachedEntry, CrdStore, SqliteStore};
pub use config::CrdocConfig;
pub use error::{Result, StoreError};
pub use key::{DEFAULT_HOST, DocPath, RepoRef};
pub use suggest::suggest_keys;
