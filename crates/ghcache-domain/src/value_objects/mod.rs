//! Value objects
//!
//! Immutable request/response snapshots and the labels attached to them.

pub mod cache_control;
pub mod cache_mode;
pub mod cached_response;
pub mod request;
pub mod response;

pub use cache_control::CacheControl;
pub use cache_mode::CacheMode;
pub use cached_response::CachedResponse;
pub use request::{Request, RequestKey};
pub use response::Response;
