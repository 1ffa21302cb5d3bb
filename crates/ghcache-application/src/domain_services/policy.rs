//! Upstream cache policy
//!
//! The upstream API typically answers with something like
//! `Cache-Control: private, max-age=60, s-maxage=60`, which would let the
//! cache trust an entry for a minute. Conditional requests for unchanged
//! resources cost no API tokens, so every response is rewritten to
//! `Cache-Control: no-cache`: store it, but always revalidate with its
//! validators. Errors become `no-store`; revalidating them costs as much
//! as a fresh call. A `304` passed through to a caller that sent its own
//! validator is marked `Status: 304 Not Modified`, like a revalidated entry.

use std::sync::Arc;

use async_trait::async_trait;
use ghcache_domain::constants::{
    DIRECTIVE_NO_CACHE, DIRECTIVE_NO_STORE, STATUS_HEADER, STATUS_NOT_MODIFIED,
    X_CONDITIONAL_REQUEST,
};
use ghcache_domain::{Fetcher, Request, Response, Result};
use http::StatusCode;
use http::header::{CACHE_CONTROL, HeaderName, HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH};
use tracing::error;

/// Rewrites upstream cacheability before responses reach the store
pub struct CachePolicyFilter {
    upstream: Arc<dyn Fetcher>,
}

impl CachePolicyFilter {
    /// Wrap an upstream client
    pub fn new(upstream: Arc<dyn Fetcher>) -> Self {
        Self { upstream }
    }
}

#[async_trait]
impl Fetcher for CachePolicyFilter {
    async fn fetch(&self, request: Request) -> Result<Response> {
        // Validator sent by the caller or attached by the HTTP cache layer.
        let validator = request
            .headers()
            .get(IF_NONE_MATCH)
            .or_else(|| request.headers().get(IF_MODIFIED_SINCE))
            .cloned();
        let key = request.key();

        let mut response = match self.upstream.fetch(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(cache_key = %key, error = %e, "Error from upstream");
                return Err(e);
            }
        };

        let directive = if response.status().as_u16() >= 400 {
            DIRECTIVE_NO_STORE
        } else {
            DIRECTIVE_NO_CACHE
        };
        response
            .headers_mut()
            .insert(CACHE_CONTROL, HeaderValue::from_static(directive));

        if response.status() == StatusCode::NOT_MODIFIED {
            response.headers_mut().insert(
                HeaderName::from_static(STATUS_HEADER),
                HeaderValue::from_static(STATUS_NOT_MODIFIED),
            );
        }
        if let Some(validator) = validator {
            response
                .headers_mut()
                .insert(HeaderName::from_static(X_CONDITIONAL_REQUEST), validator);
        }
        Ok(response)
    }
}
