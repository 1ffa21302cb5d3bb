//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for ghcache: configuration, logging,
//! error context and the composition root that turns an [`AppConfig`] into
//! a running [`CacheService`](ghcache_application::CacheService).
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration: defaults, TOML file, `GHCACHE__*` environment |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Builds stores, upstream client and recorder from configuration |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`constants`] | Centralized configuration constants |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{CacheRuntime, bootstrap, new_disk_cache, new_mem_cache};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
