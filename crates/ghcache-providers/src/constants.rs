//! Provider Constants
//!
//! Constants specific to provider implementations. Header names and cache
//! directives live in `ghcache-domain`.

// ============================================================================
// CACHE STORE CONSTANTS
// ============================================================================

/// Default byte capacity of the in-memory store (64 MiB)
pub const CACHE_DEFAULT_CAPACITY_BYTES: u64 = 64 * 1024 * 1024;

/// Bytes per gigabyte for disk read cache sizing (decimal)
pub const BYTES_PER_GB: u64 = 1_000_000_000;

/// Subdirectory holding committed disk entries
pub const DISK_DATA_DIR: &str = "data";

/// Subdirectory holding partially written disk entries
pub const DISK_TEMP_DIR: &str = "temp";

// ============================================================================
// UPSTREAM CONSTANTS
// ============================================================================

/// Default total timeout for one upstream request, in seconds
pub const UPSTREAM_DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` for upstream requests
pub const UPSTREAM_DEFAULT_USER_AGENT: &str = concat!("ghcache/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// METRICS CONSTANTS
// ============================================================================

/// Default metric namespace
pub const METRICS_DEFAULT_NAMESPACE: &str = "ghcache";

/// Counter name, prefixed by the namespace
pub const METRICS_RESPONSES_NAME: &str = "responses";

/// Counter help text
pub const METRICS_RESPONSES_HELP: &str = "Number of upstream-facing fetches by cache mode";

/// Label carrying the cache mode
pub const METRICS_MODE_LABEL: &str = "mode";
