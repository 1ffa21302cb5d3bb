//! Application Layer - ghcache
//!
//! Implements the fetch pipeline in front of a token-limited upstream API.
//!
//! ## Pipeline
//!
//! ```text
//! caller → RequestCoalescer → RevalidatingCache → CachePolicyFilter → upstream
//!                                   ↕
//!                               CacheStore
//! ```
//!
//! - [`RequestCoalescer`] runs at most one delegate call per key and fans the
//!   result out to every concurrent caller
//! - [`RevalidatingCache`] serves stored snapshots only after a conditional
//!   round trip confirms them
//! - [`CachePolicyFilter`] rewrites upstream cacheability so every stored
//!   response is revalidated and errors are never stored
//! - [`classify`] labels each completed fetch with a [`CacheMode`](ghcache_domain::CacheMode)
//!
//! ## Dependencies
//!
//! This crate depends only on `ghcache-domain`; concrete stores, upstream
//! clients and recorders are injected as trait objects.

pub mod domain_services;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
