//! Cache configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{CACHE_DEFAULT_CAPACITY_BYTES, DEFAULT_DISK_CACHE_SIZE_GB};

/// Snapshot store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-memory Moka store
    #[default]
    Memory,
    /// Files under `dir`, with an in-memory read cache
    Disk,
    /// No store; coalescing only
    Null,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Which store to use
    pub backend: CacheBackend,

    /// Root directory for the disk backend
    pub dir: Option<PathBuf>,

    /// Disk backend read cache size in gigabytes
    pub size_gb: u64,

    /// Memory backend capacity in bytes
    pub memory_capacity_bytes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            dir: None,
            size_gb: DEFAULT_DISK_CACHE_SIZE_GB,
            memory_capacity_bytes: CACHE_DEFAULT_CAPACITY_BYTES,
        }
    }
}
