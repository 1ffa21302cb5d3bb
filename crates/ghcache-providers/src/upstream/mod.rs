//! Upstream HTTP clients
//!
//! The terminal [`Fetcher`](ghcache_domain::Fetcher) of the pipeline: sends
//! the request to the real API and reads the whole body.

#[cfg(feature = "upstream-reqwest")]
pub mod http_client;

#[cfg(feature = "upstream-reqwest")]
pub use http_client::{ReqwestUpstream, UpstreamClientConfig};
