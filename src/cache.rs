//! Session cache for the loaded catalog and links.
//!
//! The combined payload is persisted as JSON text together with the time it was
//! written. Entries older than the TTL are discarded on read; anything that
//! fails to parse is treated as a miss.

use crate::catalog::{Catalog, Links};
use crate::error::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// How long a cached payload stays valid.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// File name of the cache entry inside the cache directory.
const CACHE_FILE: &str = "session.json";

/// A cached catalog/links pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheEntry {
    pub catalog: Catalog,
    pub links: Links,
    /// Unix time in milliseconds when the entry was written
    pub timestamp: u64,
}

#[derive(Serialize)]
struct CacheEntryRef<'a> {
    catalog: &'a Catalog,
    links: &'a Links,
    timestamp: u64,
}

/// File-backed cache with a fixed time-to-live.
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
    ttl: Duration,
}

impl SessionCache {
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    /// Cache stored under `<dir>/soundsite/session.json`.
    pub fn in_dir(dir: &Path, ttl: Duration) -> Self {
        Self::new(dir.join("soundsite").join(CACHE_FILE), ttl)
    }

    /// Cache in the platform cache directory, if one exists.
    pub fn default_location(ttl: Duration) -> Option<Self> {
        dirs::cache_dir().map(|dir| Self::in_dir(&dir, ttl))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Loads a fresh entry, if any.
    pub async fn load(&self) -> Option<CacheEntry> {
        self.load_at(SystemTime::now()).await
    }

    /// Loads the entry if it is younger than the TTL as of `now`.
    ///
    /// Expired entries are deleted. Entries stamped in the future count as fresh.
    pub async fn load_at(&self, now: SystemTime) -> Option<CacheEntry> {
        let content = tokio::fs::read_to_string(&self.path).await.ok()?;
        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Ignoring malformed cache at {}: {}", self.path.display(), e);
                return None;
            }
        };

        let age = unix_millis(now).saturating_sub(entry.timestamp);
        if u128::from(age) >= self.ttl.as_millis() {
            tracing::debug!("Cache expired ({} ms old), discarding", age);
            let _ = tokio::fs::remove_file(&self.path).await;
            return None;
        }

        tracing::debug!("Using cached site data ({} ms old)", age);
        Some(entry)
    }

    /// Writes the pair with the current time.
    pub async fn store(&self, catalog: &Catalog, links: &Links) -> Result<()> {
        self.store_at(catalog, links, SystemTime::now()).await
    }

    /// Writes the pair stamped with `now`, creating parent directories if needed.
    pub async fn store_at(&self, catalog: &Catalog, links: &Links, now: SystemTime) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let entry = CacheEntryRef {
            catalog,
            links,
            timestamp: unix_millis(now),
        };
        let content = serde_json::to_string(&entry).context("Failed to serialize cache entry")?;
        tokio::fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write cache to {}", self.path.display()))?;
        Ok(())
    }

    /// Removes the cache file. A missing file is not an error.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove cache at {}", self.path.display())),
        }
    }
}

fn unix_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Album;
    use assert2::{check, let_assert};
    use tempfile::TempDir;

    fn sample_catalog() -> Catalog {
        Catalog {
            tracks: vec![],
            albums: vec![Album {
                id: "a1".to_string(),
                title: "Blue Hours".to_string(),
                artist: "Sea Lion".to_string(),
                year: Some(2020),
                cover: None,
            }],
        }
    }

    #[tokio::test]
    async fn test_store_then_load_within_ttl() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::in_dir(dir.path(), DEFAULT_TTL);
        let now = SystemTime::now();

        cache
            .store_at(&sample_catalog(), &Links::default(), now)
            .await
            .unwrap();

        let_assert!(Some(entry) = cache.load_at(now + Duration::from_secs(60)).await);
        check!(entry.catalog == sample_catalog());
        check!(entry.timestamp == unix_millis(now));
    }

    #[tokio::test]
    async fn test_expired_entry_is_discarded() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::in_dir(dir.path(), DEFAULT_TTL);
        let now = SystemTime::now();

        cache
            .store_at(&sample_catalog(), &Links::default(), now)
            .await
            .unwrap();

        check!(cache.load_at(now + DEFAULT_TTL).await.is_none());
        check!(!cache.path().exists());
    }

    #[tokio::test]
    async fn test_malformed_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::new(dir.path().join("session.json"), DEFAULT_TTL);
        std::fs::write(cache.path(), "{not json").unwrap();

        check!(cache.load().await.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = SessionCache::in_dir(dir.path(), DEFAULT_TTL);
        check!(cache.load().await.is_none());
        check!(cache.clear().await.is_ok());
    }
}
