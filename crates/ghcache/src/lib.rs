//! # ghcache
//!
//! A coalescing, always-revalidating cache for token-limited HTTP APIs.
//!
//! Concurrent identical reads share one upstream call, and every stored
//! response is served only after a conditional request confirms it, so
//! unchanged resources cost no API quota.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ghcache::domain::Request;
//! use ghcache::infrastructure::new_mem_cache;
//! use ghcache::providers::upstream::{ReqwestUpstream, UpstreamClientConfig};
//!
//! let upstream = Arc::new(ReqwestUpstream::new(&UpstreamClientConfig::default())?);
//! let cache = new_mem_cache(upstream);
//! let response = cache.fetch(Request::get("https://api.github.com/repos/octo/hello")).await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Request/response types, cache modes, ports and errors
//! - `application` - Coalescer, HTTP cache, policy filter and composition
//! - `providers` - Stores, upstream client and recorders
//! - `infrastructure` - Configuration, logging and bootstrap

/// Domain layer - core types, ports and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use ghcache_domain::*;
}

/// Application layer - the fetch pipeline
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use ghcache_application::*;
}

/// Provider implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use ghcache_providers::*;
}

/// Infrastructure layer - config, logging and bootstrap
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use ghcache_infrastructure::*;
}

pub mod cli;

pub use ghcache_application::CacheService;
pub use ghcache_domain::{CacheMode, Error, Request, Response, Result};
