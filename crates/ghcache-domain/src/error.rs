//! Error handling types
//!
//! The domain error is `Clone`: a single upstream failure is captured once by the
//! request coalescer and handed to every waiter, so sources are held in an [`Arc`].

use std::sync::Arc;

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Shared, cloneable error source
pub type SharedSource = Arc<dyn std::error::Error + Send + Sync>;

/// Main error type for ghcache
#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Transport or network failure talking to the upstream API
    #[error("Upstream error: {message}")]
    Upstream {
        /// Description of the upstream failure
        message: String,
        /// HTTP status, when the failure carried one
        status: Option<u16>,
        /// Optional source error
        #[source]
        source: Option<SharedSource>,
    },

    /// A stored or broadcast response snapshot could not be materialized
    #[error("Read error: {message}")]
    Read {
        /// Description of the read failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<SharedSource>,
    },

    /// Cache store operation error
    #[error("Cache error: {message}")]
    Cache {
        /// Description of the cache error
        message: String,
        /// Optional source error
        #[source]
        source: Option<SharedSource>,
    },

    /// Configuration-related error (invalid store, bad construction parameters)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<SharedSource>,
    },

    /// A caller-imposed deadline elapsed
    #[error("Timeout: {message}")]
    Timeout {
        /// Description of what timed out
        message: String,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<SharedSource>,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {message}")]
    Json {
        /// Description of the JSON error
        message: String,
        /// Optional source error
        #[source]
        source: Option<SharedSource>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(Arc::new(err)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            message: err.to_string(),
            source: Some(Arc::new(err)),
        }
    }
}

// Upstream error creation methods
impl Error {
    /// Create an upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Create an upstream error with source
    pub fn upstream_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Upstream {
            message: message.into(),
            status: None,
            source: Some(Arc::new(source)),
        }
    }
}

// Read and cache error creation methods
impl Error {
    /// Create a read error with source
    pub fn read_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Read {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }

    /// Create a cache error with source
    pub fn cache_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Cache {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Arc::new(source)),
        }
    }
}

// Remaining creation methods
impl Error {
    /// Create a timeout error
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error came from the upstream API
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Whether this error is a caller-side deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
