//! Top-level application configuration

use serde::{Deserialize, Serialize};

use super::{CacheConfig, CoalescerConfig, LoggingConfig, MetricsConfig, UpstreamConfig};

/// Complete ghcache configuration
///
/// Each section falls back to its defaults when absent from every source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Snapshot store selection and sizing
    pub cache: CacheConfig,
    /// Upstream HTTP client
    pub upstream: UpstreamConfig,
    /// Request coalescing
    pub coalescer: CoalescerConfig,
    /// Mode counters
    pub metrics: MetricsConfig,
    /// Logging
    pub logging: LoggingConfig,
}
