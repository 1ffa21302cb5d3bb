//! Use cases
//!
//! Composition of the fetch pipeline into a single service.

pub mod cache_service;

pub use cache_service::{CacheService, CacheServiceBuilder};
