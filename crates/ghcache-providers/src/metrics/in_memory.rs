//! In-memory mode recorder

use std::collections::HashMap;

use dashmap::DashMap;
use ghcache_domain::CacheMode;
use ghcache_domain::ports::ModeRecorder;

/// Counts modes in a concurrent map
#[derive(Debug, Default)]
pub struct InMemoryModeRecorder {
    counts: DashMap<CacheMode, u64>,
}

impl InMemoryModeRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count for `mode`
    pub fn count(&self, mode: CacheMode) -> u64 {
        self.counts.get(&mode).map_or(0, |c| *c)
    }

    /// Sum over all modes
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| *c.value()).sum()
    }

    /// Copy of every non-zero counter
    pub fn snapshot(&self) -> HashMap<CacheMode, u64> {
        self.counts
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }
}

impl ModeRecorder for InMemoryModeRecorder {
    fn record(&self, mode: CacheMode) {
        *self.counts.entry(mode).or_insert(0) += 1;
    }
}
