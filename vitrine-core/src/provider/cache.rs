use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use vitrine_model::Item;

use crate::error::{GalleryError, Result};

/// Directory managed by `cacache` (index plus content-addressed blobs).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CacheRoot(PathBuf);

impl CacheRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Debug for CacheRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CacheRoot").field(&self.0).finish()
    }
}

/// Key/value byte store backing the item cache.
///
/// `get` returns `Ok(None)` for a missing key and
/// [`GalleryError::CacheCorruption`] when stored bytes fail verification.
#[async_trait]
pub trait CacheStore: Send + Sync + fmt::Debug {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Integrity-checked on-disk store.
#[derive(Clone, Debug)]
pub struct DiskCacheStore {
    root: CacheRoot,
}

impl DiskCacheStore {
    pub fn new(root: CacheRoot) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &CacheRoot {
        &self.root
    }

    /// Drop every entry under the root.
    pub async fn clear(&self) -> Result<()> {
        cacache::clear(self.root.as_path()).await.map_err(|e| {
            GalleryError::Cache(format!("cacache clear failed: {e}"))
        })
    }
}

#[async_trait]
impl CacheStore for DiskCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match cacache::read(self.root.as_path(), key).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(cacache::Error::EntryNotFound(_, _)) => Ok(None),
            Err(cacache::Error::IntegrityError(err)) => {
                Err(GalleryError::CacheCorruption(format!(
                    "cache entry failed integrity check: {key} ({err})"
                )))
            }
            Err(cacache::Error::SizeMismatch(wanted, actual)) => {
                Err(GalleryError::CacheCorruption(format!(
                    "cache entry size mismatch: key={key}, wanted={wanted}, actual={actual}"
                )))
            }
            Err(cacache::Error::IoError(err, msg))
                if err.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::debug!(%key, %msg, "cache content missing");
                Ok(None)
            }
            Err(other) => Err(GalleryError::Cache(format!(
                "cacache read failed: {other}"
            ))),
        }
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        cacache::write(self.root.as_path(), key, bytes)
            .await
            .map(|_| ())
            .map_err(|e| {
                GalleryError::Cache(format!("cacache write failed: {e}"))
            })
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let r_opts = cacache::index::RemoveOpts::new().remove_fully(true);
        r_opts.remove(self.root.as_path(), key).await.map_err(|e| {
            GalleryError::Cache(format!("cacache remove failed: {e}"))
        })
    }
}

/// Process-local store, useful for tests and cache-less previews.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn put(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.entries.lock().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Store that never holds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCacheStore;

#[async_trait]
impl CacheStore for NullCacheStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _bytes: &[u8]) -> Result<()> {
        Ok(())
    }

    async fn remove(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}

/// Persisted item list plus the wall-clock time it was written, in unix
/// milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub items: Vec<Item>,
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(items: Vec<Item>, written_at: DateTime<Utc>) -> Self {
        Self {
            items,
            timestamp: written_at.timestamp_millis(),
        }
    }

    /// Fresh while strictly younger than `ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now.timestamp_millis().saturating_sub(self.timestamp) < ttl_ms
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode stored bytes; anything unparseable counts as corruption.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| {
            GalleryError::CacheCorruption(format!(
                "cached item list is unreadable: {e}"
            ))
        })
    }
}
