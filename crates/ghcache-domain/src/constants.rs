//! Domain constants
//!
//! Header names and `Cache-Control` directives used across the cache layers.
//! Header names are lowercase so they can be used with `HeaderName::from_static`.

// ============================================================================
// COORDINATION HEADERS
// ============================================================================

/// Set on a response whose request already carried a validator
pub const X_CONDITIONAL_REQUEST: &str = "x-conditional-request";

/// Set on a response served from a stored snapshot
pub const X_FROM_CACHE: &str = "x-from-cache";

/// Status line header; carries `304 Not Modified` after a revalidation
pub const STATUS_HEADER: &str = "status";

/// Value of [`STATUS_HEADER`] after a successful revalidation
pub const STATUS_NOT_MODIFIED: &str = "304 Not Modified";

/// Headers that are never persisted with a snapshot
pub const COORDINATION_HEADERS: [&str; 3] = [STATUS_HEADER, X_CONDITIONAL_REQUEST, X_FROM_CACHE];

// ============================================================================
// CACHE-CONTROL DIRECTIVES
// ============================================================================

/// Store, but always revalidate
pub const DIRECTIVE_NO_CACHE: &str = "no-cache";

/// Never store
pub const DIRECTIVE_NO_STORE: &str = "no-store";

/// Only answer from the cache
pub const DIRECTIVE_ONLY_IF_CACHED: &str = "only-if-cached";

/// Freshness lifetime
pub const DIRECTIVE_MAX_AGE: &str = "max-age";

// ============================================================================
// HOP-BY-HOP HEADERS
// ============================================================================

/// Headers that are never merged from a `304 Not Modified` into a snapshot
pub const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
];
