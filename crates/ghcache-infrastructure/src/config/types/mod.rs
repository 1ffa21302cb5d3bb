//! Configuration types module

pub mod app;
pub mod cache;
pub mod coalescer;
pub mod logging;
pub mod metrics;
pub mod upstream;

pub use app::AppConfig;
pub use cache::{CacheBackend, CacheConfig};
pub use coalescer::CoalescerConfig;
pub use logging::LoggingConfig;
pub use metrics::MetricsConfig;
pub use upstream::UpstreamConfig;
