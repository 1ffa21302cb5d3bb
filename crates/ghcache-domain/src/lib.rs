//! # ghcache Domain
//!
//! Core types shared by every layer of the cache:
//!
//! - [`value_objects`] - [`Request`], [`Response`], [`RequestKey`], [`CacheMode`] and the
//!   persisted [`CachedResponse`] snapshot
//! - [`ports`] - the [`Fetcher`], [`CacheStore`] and [`ModeRecorder`] seams
//! - [`error`] - the cloneable domain [`Error`]
//! - [`constants`] - header names and directive strings
//!
//! This crate has no runtime dependencies beyond pure libraries.

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{CacheStore, Fetcher, ModeRecorder};
pub use value_objects::{CacheMode, CachedResponse, Request, RequestKey, Response};
