//! Cache Store Port
//!
//! Key/value blob storage for response snapshots. Implementations are
//! internally thread-safe; callers add no locking of their own.

use async_trait::async_trait;

use crate::error::Result;

/// Persistent store of encoded response snapshots
///
/// # Implementations
///
/// - **Moka**: in-memory, bounded by total bytes
/// - **Disk**: one file per key with an in-memory read cache
/// - **Null**: stores nothing
#[async_trait]
pub trait CacheStore: Send + Sync + std::fmt::Debug {
    /// Get the bytes stored for a key
    ///
    /// # Returns
    /// `None` if the key is not present
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store bytes for a key, replacing any previous value
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Delete a key
    ///
    /// # Returns
    /// True if the key existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Get the name/identifier of this store implementation
    fn provider_name(&self) -> &str;
}
