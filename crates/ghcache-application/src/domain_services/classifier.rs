//! Cache mode classification
//!
//! Observability only: the label never feeds back into control flow.

use ghcache_domain::CacheMode;
use ghcache_domain::constants::{
    DIRECTIVE_NO_STORE, STATUS_HEADER, STATUS_NOT_MODIFIED, X_CONDITIONAL_REQUEST,
};
use ghcache_domain::value_objects::CacheControl;
use http::HeaderMap;

/// Label a completed fetch from its response headers
///
/// Priority: `NO-STORE`, then `REVALIDATED`, then `CHANGED`, otherwise `MISS`.
/// `COALESCED` and `ERROR` are assigned by the coalescer, never here.
pub fn classify(headers: &HeaderMap) -> CacheMode {
    if CacheControl::from_headers(headers).has(DIRECTIVE_NO_STORE) {
        return CacheMode::NoStore;
    }
    let revalidated = headers
        .get(STATUS_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains(STATUS_NOT_MODIFIED));
    if revalidated {
        return CacheMode::Revalidated;
    }
    if headers.contains_key(X_CONDITIONAL_REQUEST) {
        return CacheMode::Changed;
    }
    CacheMode::Miss
}
