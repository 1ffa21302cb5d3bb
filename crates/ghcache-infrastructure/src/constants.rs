//! Infrastructure layer constants
//!
//! Defaults for every configuration section. Provider-level defaults
//! (timeouts, capacities, metric names) are re-exported from
//! `ghcache-providers` so there is a single source for each value.

pub use ghcache_providers::constants::{
    BYTES_PER_GB, CACHE_DEFAULT_CAPACITY_BYTES, METRICS_DEFAULT_NAMESPACE,
    UPSTREAM_DEFAULT_TIMEOUT_SECS, UPSTREAM_DEFAULT_USER_AGENT,
};

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Environment variable prefix; nested keys are separated by `__`
pub const CONFIG_ENV_PREFIX: &str = "GHCACHE";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "ghcache.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "ghcache";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default in-memory read cache size for the disk backend, in gigabytes
pub const DEFAULT_DISK_CACHE_SIZE_GB: u64 = 1;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured filter
pub const LOG_ENV_VAR: &str = "GHCACHE_LOG";

/// File name stem for the rolling log file
pub const LOG_FILE_STEM: &str = "ghcache";
