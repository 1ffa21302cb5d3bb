//! Cache service
//!
//! Assembles coalescer, HTTP cache and policy filter around an upstream
//! client and a cache store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ghcache_domain::{
    CacheMode, CacheStore, Error, Fetcher, ModeRecorder, Request, Response, Result,
};
use tracing::info;

use crate::domain_services::{CachePolicyFilter, RequestCoalescer, RevalidatingCache};

/// The composed fetch pipeline
///
/// Safe to share between tasks; clone the surrounding `Arc` rather than the
/// service.
#[derive(Debug)]
pub struct CacheService {
    coalescer: RequestCoalescer,
    store: Arc<dyn CacheStore>,
}

impl CacheService {
    /// Start building a service
    pub fn builder() -> CacheServiceBuilder {
        CacheServiceBuilder::default()
    }

    /// Build a service over an arbitrary store, without metrics or wait limit
    pub fn new_from_store(upstream: Arc<dyn Fetcher>, store: Arc<dyn CacheStore>) -> Self {
        Self::assemble(upstream, store, None, None)
    }

    fn assemble(
        upstream: Arc<dyn Fetcher>,
        store: Arc<dyn CacheStore>,
        recorder: Option<Arc<dyn ModeRecorder>>,
        wait_timeout: Option<Duration>,
    ) -> Self {
        let policy: Arc<dyn Fetcher> = Arc::new(CachePolicyFilter::new(upstream));
        let cache: Arc<dyn Fetcher> =
            Arc::new(RevalidatingCache::new(policy, Arc::clone(&store)));
        let mut coalescer = RequestCoalescer::new(cache).with_wait_timeout(wait_timeout);
        if let Some(recorder) = recorder {
            coalescer = coalescer.with_recorder(recorder);
        }
        info!(store = store.provider_name(), "Cache service assembled");
        Self { coalescer, store }
    }

    /// Fetch through the full pipeline
    pub async fn fetch(&self, request: Request) -> Result<Response> {
        self.coalescer.fetch(request).await
    }

    /// Fetch through the full pipeline, with the mode recorded for this caller
    pub async fn fetch_with_mode(&self, request: Request) -> Result<(Response, CacheMode)> {
        self.coalescer.fetch_with_mode(request).await
    }

    /// The backing store
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Number of keys with a call currently in flight
    pub fn in_flight(&self) -> usize {
        self.coalescer.in_flight()
    }
}

#[async_trait]
impl Fetcher for CacheService {
    async fn fetch(&self, request: Request) -> Result<Response> {
        CacheService::fetch(self, request).await
    }
}

/// Builder for [`CacheService`]
#[derive(Default)]
pub struct CacheServiceBuilder {
    upstream: Option<Arc<dyn Fetcher>>,
    store: Option<Arc<dyn CacheStore>>,
    recorder: Option<Arc<dyn ModeRecorder>>,
    wait_timeout: Option<Duration>,
}

impl CacheServiceBuilder {
    /// Upstream client (required)
    pub fn upstream(mut self, upstream: Arc<dyn Fetcher>) -> Self {
        self.upstream = Some(upstream);
        self
    }

    /// Snapshot store (required)
    pub fn store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Counter sink for cache modes
    pub fn recorder(mut self, recorder: Arc<dyn ModeRecorder>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    /// Per-waiter limit on waiting for an in-flight call
    pub fn wait_timeout(mut self, wait_timeout: Option<Duration>) -> Self {
        self.wait_timeout = wait_timeout;
        self
    }

    /// Assemble the service
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the upstream or store is missing.
    pub fn build(self) -> Result<CacheService> {
        let upstream = self
            .upstream
            .ok_or_else(|| Error::configuration("Cache service requires an upstream client"))?;
        let store = self
            .store
            .ok_or_else(|| Error::configuration("Cache service requires a cache store"))?;
        Ok(CacheService::assemble(
            upstream,
            store,
            self.recorder,
            self.wait_timeout,
        ))
    }
}
