//! Metrics configuration types

use serde::{Deserialize, Serialize};

use crate::constants::METRICS_DEFAULT_NAMESPACE;

/// Mode counter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Count fetches by cache mode
    pub enabled: bool,

    /// Prometheus namespace; the counter is `<namespace>_responses`
    pub namespace: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            namespace: METRICS_DEFAULT_NAMESPACE.to_string(),
        }
    }
}
