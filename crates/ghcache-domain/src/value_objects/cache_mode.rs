//! How a fetch was fulfilled

use std::fmt;

use serde::{Deserialize, Serialize};

/// Observability label for a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum CacheMode {
    /// Not in cache, request proxied and response cached
    Miss,
    /// Cached value revalidated and returned
    Revalidated,
    /// Cached value invalid: resource changed, cache updated
    Changed,
    /// Joined an in-flight request; this is a copied response
    Coalesced,
    /// Response not cacheable
    NoStore,
    /// The fetch produced an error rather than a response
    Error,
}

impl CacheMode {
    /// Every mode, in label order
    pub const ALL: [CacheMode; 6] = [
        CacheMode::Miss,
        CacheMode::Revalidated,
        CacheMode::Changed,
        CacheMode::Coalesced,
        CacheMode::NoStore,
        CacheMode::Error,
    ];

    /// Metric label value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Miss => "MISS",
            Self::Revalidated => "REVALIDATED",
            Self::Changed => "CHANGED",
            Self::Coalesced => "COALESCED",
            Self::NoStore => "NO-STORE",
            Self::Error => "ERROR",
        }
    }

    /// Whether the fetch was fulfilled without spending API tokens
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Coalesced | Self::Revalidated)
    }
}

impl fmt::Display for CacheMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
