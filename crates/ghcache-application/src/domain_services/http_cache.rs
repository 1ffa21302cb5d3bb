//! Revalidating HTTP cache
//!
//! Stores response snapshots keyed by URL and revalidates them with their
//! `ETag` / `Last-Modified` validators. A `304 Not Modified` answer is
//! turned back into the stored `200` with the fresh end-to-end headers
//! merged in, and marked with `X-From-Cache: 1` and
//! `Status: 304 Not Modified` so the classifier can tell.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ghcache_domain::constants::{
    DIRECTIVE_NO_CACHE, DIRECTIVE_NO_STORE, DIRECTIVE_ONLY_IF_CACHED, HOP_BY_HOP_HEADERS,
    STATUS_HEADER, STATUS_NOT_MODIFIED, X_FROM_CACHE,
};
use ghcache_domain::value_objects::CacheControl;
use ghcache_domain::{CacheStore, CachedResponse, Fetcher, Request, Response, Result};
use http::header::{
    CONNECTION, ETAG, HeaderName, HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED,
};
use http::{HeaderMap, Method, StatusCode};
use tracing::{debug, warn};

/// HTTP cache in front of a [`Fetcher`], persisting into a [`CacheStore`]
pub struct RevalidatingCache {
    transport: Arc<dyn Fetcher>,
    store: Arc<dyn CacheStore>,
}

/// A decoded snapshot together with its rebuilt response
struct Snapshot {
    stored: CachedResponse,
    response: Response,
}

impl RevalidatingCache {
    /// Create a cache layer over `transport`
    pub fn new(transport: Arc<dyn Fetcher>, store: Arc<dyn CacheStore>) -> Self {
        Self { transport, store }
    }

    /// The backing store
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// Load a usable snapshot; undecodable entries are dropped and treated as absent
    async fn load(&self, key: &str) -> Option<Snapshot> {
        let bytes = match self.store.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(cache_key = key, error = %e, "Cache store read failed");
                return None;
            }
        };

        let decoded = CachedResponse::decode(&bytes)
            .and_then(|stored| stored.to_response().map(|response| (stored, response)));
        match decoded {
            Ok((stored, response)) => Some(Snapshot { stored, response }),
            Err(e) => {
                warn!(cache_key = key, error = %e, "Discarding unreadable cache entry");
                self.remove(key).await;
                None
            }
        }
    }

    async fn remove(&self, key: &str) {
        if let Err(e) = self.store.delete(key).await {
            warn!(cache_key = key, error = %e, "Cache store delete failed");
        }
    }

    async fn persist(&self, key: &str, request: &Request, response: &Response) {
        let snapshot = CachedResponse::capture(response, request, Utc::now());
        let written = match snapshot.encode() {
            Ok(bytes) => self.store.put(key, bytes).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            warn!(cache_key = key, error = %e, "Cache store write failed");
        }
    }

    /// Send a conditional request for a stored snapshot
    async fn revalidate(
        &self,
        key: &str,
        mut request: Request,
        snapshot: Snapshot,
    ) -> Result<Response> {
        attach_validators(&mut request, &snapshot.stored);
        let is_get = *request.method() == Method::GET;

        match self.transport.fetch(request).await {
            Ok(fresh) if is_get && fresh.status() == StatusCode::NOT_MODIFIED => {
                debug!(cache_key = key, "Cache entry revalidated");
                let mut merged = snapshot.response;
                merge_end_to_end(merged.headers_mut(), fresh.headers());
                merged.headers_mut().insert(
                    HeaderName::from_static(STATUS_HEADER),
                    HeaderValue::from_static(STATUS_NOT_MODIFIED),
                );
                Ok(mark_from_cache(merged))
            }
            Ok(fresh) => {
                if fresh.status() != StatusCode::OK {
                    self.remove(key).await;
                }
                Ok(fresh)
            }
            Err(e) => {
                self.remove(key).await;
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Fetcher for RevalidatingCache {
    async fn fetch(&self, request: Request) -> Result<Response> {
        let key = request.store_key();
        let cacheable = request.is_cacheable();
        let request_cc = CacheControl::from_headers(request.headers());

        let snapshot = if cacheable {
            self.load(&key)
                .await
                .filter(|s| s.stored.vary_matches(&request))
        } else {
            None
        };

        let original = request.clone();
        let response = match snapshot {
            Some(snapshot) if is_fresh(&snapshot, &request_cc) => {
                debug!(cache_key = %key, "Serving fresh cache entry");
                return Ok(mark_from_cache(snapshot.response));
            }
            Some(snapshot) => self.revalidate(&key, request, snapshot).await?,
            None if request_cc.has(DIRECTIVE_ONLY_IF_CACHED) => {
                return Ok(Response::new(StatusCode::GATEWAY_TIMEOUT));
            }
            None => self.transport.fetch(request).await?,
        };

        // A raw 304 answers a caller's own validator and has no body to keep.
        if cacheable && response.status() != StatusCode::NOT_MODIFIED {
            let storable = !request_cc.has(DIRECTIVE_NO_STORE)
                && !response.cache_control().has(DIRECTIVE_NO_STORE);
            if storable {
                self.persist(&key, &original, &response).await;
            } else {
                self.remove(&key).await;
            }
        }
        Ok(response)
    }
}

fn is_fresh(snapshot: &Snapshot, request_cc: &CacheControl) -> bool {
    if request_cc.has(DIRECTIVE_NO_CACHE) {
        return false;
    }
    let response_cc = snapshot.response.cache_control();
    if response_cc.has(DIRECTIVE_NO_CACHE) {
        return false;
    }
    response_cc
        .max_age()
        .is_some_and(|max_age| snapshot.stored.age_secs(Utc::now()) < max_age)
}

/// Add the snapshot's validators unless the caller supplied its own
fn attach_validators(request: &mut Request, stored: &CachedResponse) {
    let pairs = [(ETAG, IF_NONE_MATCH), (LAST_MODIFIED, IF_MODIFIED_SINCE)];
    for (source, target) in pairs {
        if request.headers().contains_key(&target) {
            continue;
        }
        let value = stored
            .header(source.as_str())
            .and_then(|v| HeaderValue::from_str(v).ok());
        if let Some(value) = value {
            request.headers_mut().insert(target, value);
        }
    }
}

/// Replace stored headers with the end-to-end headers of a `304` answer
fn merge_end_to_end(stored: &mut HeaderMap, fresh: &HeaderMap) {
    let listed: Vec<String> = fresh
        .get_all(CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    for name in fresh.keys() {
        let hop_by_hop = HOP_BY_HOP_HEADERS.contains(&name.as_str())
            || listed.iter().any(|l| l == name.as_str());
        if hop_by_hop {
            continue;
        }
        stored.remove(name);
        for value in fresh.get_all(name) {
            stored.append(name.clone(), value.clone());
        }
    }
}

fn mark_from_cache(mut response: Response) -> Response {
    response.headers_mut().insert(
        HeaderName::from_static(X_FROM_CACHE),
        HeaderValue::from_static("1"),
    );
    response
}
