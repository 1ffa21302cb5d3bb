//! Disk cache store
//!
//! Persists each entry as one file under `<dir>/data`, named by the SHA-256
//! of its key. Writes go to `<dir>/temp` first and are renamed into place,
//! so readers never observe a partial entry. Recently read entries are kept
//! in a Moka cache bounded by total bytes.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use ghcache_domain::error::{Error, Result};
use ghcache_domain::ports::CacheStore;
use moka::future::Cache;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::constants::{DISK_DATA_DIR, DISK_TEMP_DIR};

/// File-backed store with an in-memory read cache
pub struct DiskCacheStore {
    data_dir: PathBuf,
    temp_dir: PathBuf,
    reads: Cache<String, Vec<u8>>,
    read_cache_bytes: u64,
    sequence: AtomicU64,
}

impl DiskCacheStore {
    /// Open (creating if needed) a store rooted at `dir`
    ///
    /// `read_cache_bytes` bounds the in-memory copy of recently used entries;
    /// the files themselves are not size-limited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the directories cannot be created.
    pub async fn open(dir: impl AsRef<Path>, read_cache_bytes: u64) -> Result<Self> {
        let dir = dir.as_ref();
        let data_dir = dir.join(DISK_DATA_DIR);
        let temp_dir = dir.join(DISK_TEMP_DIR);
        for path in [&data_dir, &temp_dir] {
            tokio::fs::create_dir_all(path).await.map_err(|e| {
                Error::configuration_with_source(
                    format!("Cannot create cache directory {}", path.display()),
                    e,
                )
            })?;
        }

        let reads = Cache::builder()
            .max_capacity(read_cache_bytes)
            .weigher(|key: &String, value: &Vec<u8>| {
                u32::try_from(key.len() + value.len()).unwrap_or(u32::MAX)
            })
            .build();

        debug!(dir = %dir.display(), read_cache_bytes, "Opened disk cache");
        Ok(Self {
            data_dir,
            temp_dir,
            reads,
            read_cache_bytes,
            sequence: AtomicU64::new(0),
        })
    }

    /// Directory holding committed entries
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing `key`
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(file_name(key))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.temp_dir
            .join(format!("{}.{}.{sequence}", file_name(key), std::process::id()))
    }
}

fn file_name(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

#[async_trait]
impl CacheStore for DiskCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if let Some(bytes) = self.reads.get(key).await {
            return Ok(Some(bytes));
        }
        match tokio::fs::read(self.entry_path(key)).await {
            Ok(bytes) => {
                self.reads.insert(key.to_string(), bytes.clone()).await;
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::cache_with_source(
                format!("Failed to read cache entry for {key}"),
                e,
            )),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let temp = self.temp_path(key);
        tokio::fs::write(&temp, &value).await.map_err(|e| {
            Error::cache_with_source(format!("Failed to write cache entry for {key}"), e)
        })?;
        if let Err(e) = tokio::fs::rename(&temp, self.entry_path(key)).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(Error::cache_with_source(
                format!("Failed to commit cache entry for {key}"),
                e,
            ));
        }
        self.reads.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.reads.invalidate(key).await;
        match tokio::fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(Error::cache_with_source(
                format!("Failed to delete cache entry for {key}"),
                e,
            )),
        }
    }

    fn provider_name(&self) -> &str {
        "disk"
    }
}

impl std::fmt::Debug for DiskCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiskCacheStore")
            .field("data_dir", &self.data_dir)
            .field("read_cache_bytes", &self.read_cache_bytes)
            .finish_non_exhaustive()
    }
}
