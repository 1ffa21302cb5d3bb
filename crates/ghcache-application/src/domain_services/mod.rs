//! Domain services
//!
//! The stages of the fetch pipeline, each implementing
//! [`Fetcher`](ghcache_domain::Fetcher), plus the pure mode classifier.

pub mod classifier;
pub mod coalescer;
pub mod http_cache;
pub mod policy;

pub use classifier::classify;
pub use coalescer::RequestCoalescer;
pub use http_cache::RevalidatingCache;
pub use policy::CachePolicyFilter;
