//! Null cache store
//!
//! Accepts every write and never returns anything.

use async_trait::async_trait;
use ghcache_domain::error::Result;
use ghcache_domain::ports::CacheStore;

/// Store that keeps nothing
///
/// With this store every fetch is a full upstream call; coalescing still
/// applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCacheStore;

impl NullCacheStore {
    /// Create a new null store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheStore for NullCacheStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn put(&self, _key: &str, _value: Vec<u8>) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}
