//! Upstream client configuration types

use std::time::Duration;

use ghcache_providers::upstream::UpstreamClientConfig;
use serde::{Deserialize, Serialize};

use crate::constants::{UPSTREAM_DEFAULT_TIMEOUT_SECS, UPSTREAM_DEFAULT_USER_AGENT};

/// Upstream HTTP client configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Total timeout per request, in seconds
    pub timeout_secs: u64,

    /// `User-Agent` header
    pub user_agent: String,

    /// API token sent as a bearer credential
    pub token: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: UPSTREAM_DEFAULT_TIMEOUT_SECS,
            user_agent: UPSTREAM_DEFAULT_USER_AGENT.to_string(),
            token: None,
        }
    }
}

impl UpstreamConfig {
    /// Client settings for the reqwest provider
    pub fn client_config(&self) -> UpstreamClientConfig {
        UpstreamClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
            token: self.token.clone(),
        }
    }
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
