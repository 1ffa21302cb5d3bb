//! Cache Store Implementations
//!
//! Byte-oriented persistence for response snapshots.
//!
//! ## Available Stores
//!
//! | Store | Type | Description |
//! |-------|------|-------------|
//! | [`NullCacheStore`] | Testing | Stores nothing; every fetch goes upstream |
//! | [`MokaCacheStore`] | Local | In-memory, bounded by total bytes |
//! | [`DiskCacheStore`] | Local | Files on disk behind an in-memory read cache |
//!
//! ## Store Selection Guide
//!
//! - **Short-lived processes**: `MokaCacheStore`
//! - **Repeated runs against the same API**: `DiskCacheStore`, so validators
//!   survive restarts

#[cfg(feature = "cache-disk")]
pub mod disk;
#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;

#[cfg(feature = "cache-disk")]
pub use disk::DiskCacheStore;
#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheStore;
pub use null::NullCacheStore;
