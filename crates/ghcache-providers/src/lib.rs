//! # ghcache - Provider Implementations
//!
//! Concrete adapters for the ports defined in `ghcache-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Cache store | `CacheStore` | Moka, Disk, Null |
//! | Upstream | `Fetcher` | Reqwest |
//! | Mode recorder | `ModeRecorder` | Prometheus, InMemory |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! ghcache-providers = { version = "0.1", default-features = false, features = ["cache-moka"] }
//! ```

pub use ghcache_domain::error::{Error, Result};
pub use ghcache_domain::ports::{CacheStore, Fetcher, ModeRecorder};

/// Provider-specific constants
pub mod constants;

/// Cache store implementations
pub mod cache;

/// Upstream HTTP clients
pub mod upstream;

/// Cache mode recorders
pub mod metrics;
