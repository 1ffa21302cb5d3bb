//! Moka in-memory cache store
//!
//! Concurrent in-memory store bounded by the total size of its entries.
//!
//! ## Example
//!
//! ```ignore
//! use ghcache_providers::cache::MokaCacheStore;
//!
//! let store = MokaCacheStore::with_capacity(16 * 1024 * 1024);
//! ```

use async_trait::async_trait;
use ghcache_domain::error::Result;
use ghcache_domain::ports::CacheStore;
use moka::future::Cache;

use crate::constants::CACHE_DEFAULT_CAPACITY_BYTES;

/// Moka-based in-memory store
///
/// Entries are weighed by key plus value length, so `capacity_bytes` bounds
/// memory rather than entry count.
#[derive(Clone)]
pub struct MokaCacheStore {
    cache: Cache<String, Vec<u8>>,
    capacity_bytes: u64,
}

impl Default for MokaCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheStore {
    /// Create a store with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(CACHE_DEFAULT_CAPACITY_BYTES)
    }

    /// Create a store holding at most `capacity_bytes` of keys and values
    pub fn with_capacity(capacity_bytes: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity_bytes)
            .weigher(|key: &String, value: &Vec<u8>| {
                u32::try_from(key.len() + value.len()).unwrap_or(u32::MAX)
            })
            .build();
        Self {
            cache,
            capacity_bytes,
        }
    }

    /// Configured byte capacity
    pub fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    /// Number of entries after pending evictions have run
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.cache.get(key).await)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.cache.insert(key.to_string(), value).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheStore")
            .field("capacity_bytes", &self.capacity_bytes)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}
