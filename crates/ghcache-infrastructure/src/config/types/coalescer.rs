//! Coalescer configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Request coalescing configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoalescerConfig {
    /// Maximum time a waiter waits for the in-flight call; unbounded when unset
    pub wait_timeout_ms: Option<u64>,
}

impl CoalescerConfig {
    /// Waiter deadline as a [`Duration`]
    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_ms.map(Duration::from_millis)
    }
}
