//! Composition root
//!
//! Turns an [`AppConfig`] into a ready [`CacheService`]: picks the store,
//! builds the upstream client and, when enabled, a Prometheus recorder.

use std::path::Path;
use std::sync::Arc;

use ghcache_application::CacheService;
use ghcache_domain::error::{Error, Result};
use ghcache_domain::ports::{CacheStore, Fetcher};
use ghcache_providers::cache::{DiskCacheStore, MokaCacheStore, NullCacheStore};
use ghcache_providers::metrics::PrometheusModeRecorder;
use ghcache_providers::upstream::ReqwestUpstream;
use tracing::info;

use crate::config::{AppConfig, CacheBackend, CacheConfig, UpstreamConfig};
use crate::constants::BYTES_PER_GB;

/// A configured service together with its exported metrics
#[derive(Debug, Clone)]
pub struct CacheRuntime {
    /// The composed fetch pipeline
    pub service: Arc<CacheService>,
    /// Mode counters, when metrics are enabled
    pub metrics: Option<Arc<PrometheusModeRecorder>>,
}

/// Build the runtime described by `config`, talking to the real upstream
pub async fn bootstrap(config: &AppConfig) -> Result<CacheRuntime> {
    let upstream = upstream_from_config(&config.upstream)?;
    bootstrap_with_upstream(config, upstream).await
}

/// Build the runtime described by `config` around an existing upstream client
pub async fn bootstrap_with_upstream(
    config: &AppConfig,
    upstream: Arc<dyn Fetcher>,
) -> Result<CacheRuntime> {
    let store = store_from_config(&config.cache).await?;
    let mut builder = CacheService::builder()
        .upstream(upstream)
        .store(store)
        .wait_timeout(config.coalescer.wait_timeout());

    let metrics = if config.metrics.enabled {
        let recorder = Arc::new(PrometheusModeRecorder::new(&config.metrics.namespace)?);
        builder = builder.recorder(recorder.clone());
        Some(recorder)
    } else {
        None
    };

    let service = Arc::new(builder.build()?);
    info!(
        backend = ?config.cache.backend,
        metrics = config.metrics.enabled,
        "Cache runtime ready"
    );
    Ok(CacheRuntime { service, metrics })
}

/// Reqwest client from the upstream section
pub fn upstream_from_config(config: &UpstreamConfig) -> Result<Arc<dyn Fetcher>> {
    Ok(Arc::new(ReqwestUpstream::new(&config.client_config())?))
}

/// Snapshot store from the cache section
pub async fn store_from_config(config: &CacheConfig) -> Result<Arc<dyn CacheStore>> {
    let store: Arc<dyn CacheStore> = match config.backend {
        CacheBackend::Memory => Arc::new(MokaCacheStore::with_capacity(
            config.memory_capacity_bytes,
        )),
        CacheBackend::Disk => {
            let dir = config.dir.as_deref().ok_or_else(|| {
                Error::configuration("Cache directory is required for the disk backend")
            })?;
            Arc::new(open_disk_store(dir, config.size_gb).await?)
        }
        CacheBackend::Null => Arc::new(NullCacheStore::new()),
    };
    Ok(store)
}

async fn open_disk_store(dir: &Path, size_gb: u64) -> Result<DiskCacheStore> {
    if size_gb == 0 {
        return Err(Error::configuration(
            "Cache size must be at least 1 GB for the disk backend",
        ));
    }
    DiskCacheStore::open(dir, size_gb.saturating_mul(BYTES_PER_GB)).await
}

/// Service over a default-sized in-memory store
pub fn new_mem_cache(upstream: Arc<dyn Fetcher>) -> CacheService {
    CacheService::new_from_store(upstream, Arc::new(MokaCacheStore::new()))
}

/// Service over a disk store rooted at `dir` with a `size_gb` read cache
pub async fn new_disk_cache(
    upstream: Arc<dyn Fetcher>,
    dir: impl AsRef<Path>,
    size_gb: u64,
) -> Result<CacheService> {
    let store = open_disk_store(dir.as_ref(), size_gb).await?;
    Ok(CacheService::new_from_store(upstream, Arc::new(store)))
}
