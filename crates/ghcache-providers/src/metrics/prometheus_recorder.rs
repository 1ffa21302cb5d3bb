//! Prometheus mode recorder
//!
//! Each recorder owns its registry, so several services can coexist in one
//! process (and in tests) without duplicate-registration errors.

use ghcache_domain::CacheMode;
use ghcache_domain::error::{Error, Result};
use ghcache_domain::ports::ModeRecorder;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::constants::{METRICS_MODE_LABEL, METRICS_RESPONSES_HELP, METRICS_RESPONSES_NAME};

/// `<namespace>_responses` counter labelled by `mode`
#[derive(Clone)]
pub struct PrometheusModeRecorder {
    registry: Registry,
    responses: IntCounterVec,
}

impl PrometheusModeRecorder {
    /// Register the counter under `namespace`
    ///
    /// Every mode label is initialised to zero so dashboards see the full set
    /// from the first scrape.
    pub fn new(namespace: &str) -> Result<Self> {
        let opts = Opts::new(METRICS_RESPONSES_NAME, METRICS_RESPONSES_HELP).namespace(namespace);
        let responses = IntCounterVec::new(opts, &[METRICS_MODE_LABEL]).map_err(|e| {
            Error::configuration(format!("Invalid metrics namespace {namespace:?}: {e}"))
        })?;

        let registry = Registry::new();
        registry
            .register(Box::new(responses.clone()))
            .map_err(|e| Error::configuration(format!("Failed to register counter: {e}")))?;

        for mode in CacheMode::ALL {
            responses.with_label_values(&[mode.as_str()]).reset();
        }
        Ok(Self {
            registry,
            responses,
        })
    }

    /// The registry holding the counter
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Current value for `mode`
    pub fn count(&self, mode: CacheMode) -> u64 {
        self.responses.with_label_values(&[mode.as_str()]).get()
    }

    /// Text exposition of the registry
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(|e| Error::internal(format!("Failed to encode metrics: {e}")))?;
        String::from_utf8(buffer)
            .map_err(|e| Error::internal(format!("Metrics are not UTF-8: {e}")))
    }
}

impl ModeRecorder for PrometheusModeRecorder {
    fn record(&self, mode: CacheMode) {
        self.responses.with_label_values(&[mode.as_str()]).inc();
    }
}

impl std::fmt::Debug for PrometheusModeRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusModeRecorder").finish_non_exhaustive()
    }
}
