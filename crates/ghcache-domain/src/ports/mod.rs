//! Ports
//!
//! The seams of the cache. Every layer of the fetch pipeline is a [`Fetcher`],
//! so the coalescer, the HTTP cache, the policy filter and the upstream client
//! compose by wrapping one another.
//!
//! | Port | Implementations |
//! |------|-----------------|
//! | [`Fetcher`] | upstream client, policy filter, HTTP cache, coalescer |
//! | [`CacheStore`] | moka, disk, null |
//! | [`ModeRecorder`] | prometheus, in-memory |

pub mod cache_store;
pub mod fetcher;
pub mod metrics;

pub use cache_store::CacheStore;
pub use fetcher::Fetcher;
pub use metrics::ModeRecorder;
