//! Tests for the revalidating HTTP cache layer

use std::sync::Arc;

use ghcache_application::{CachePolicyFilter, RevalidatingCache};
use ghcache_domain::{CachedResponse, Error, Fetcher, Request, Response};
use http::header::{
    CACHE_CONTROL, CONNECTION, ETAG, HeaderName, HeaderValue, IF_MODIFIED_SINCE, IF_NONE_MATCH,
    LAST_MODIFIED, VARY,
};
use http::{Method, StatusCode};

use crate::test_utils::{MemoryStore, MockUpstream, Resource, URL};

struct Harness {
    cache: RevalidatingCache,
    upstream: Arc<MockUpstream>,
    store: Arc<MemoryStore>,
}

/// Cache layer directly over the mock, without the policy filter
fn harness(upstream: MockUpstream) -> Harness {
    let upstream = Arc::new(upstream);
    let store = Arc::new(MemoryStore::default());
    let cache = RevalidatingCache::new(upstream.clone(), store.clone());
    Harness {
        cache,
        upstream,
        store,
    }
}

/// Cache layer over the policy filter, as assembled in production
fn filtered(upstream: MockUpstream) -> Harness {
    let upstream = Arc::new(upstream);
    let store = Arc::new(MemoryStore::default());
    let policy = Arc::new(CachePolicyFilter::new(upstream.clone()));
    let cache = RevalidatingCache::new(policy, store.clone());
    Harness {
        cache,
        upstream,
        store,
    }
}

fn stored(store: &MemoryStore, key: &str) -> CachedResponse {
    CachedResponse::decode(&store.raw(key).expect("entry stored")).unwrap()
}

#[tokio::test]
async fn test_first_fetch_is_stored_without_markers() {
    let h = filtered(MockUpstream::resource(Resource::shared("\"v1\"", "hello")));

    let response = h.cache.fetch(Request::get(URL)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.header_str("x-from-cache").is_none());
    let snapshot = stored(&h.store, URL);
    assert_eq!(snapshot.header("etag"), Some("\"v1\""));
    assert_eq!(snapshot.header("cache-control"), Some("no-cache"));
    assert!(snapshot.header("x-from-cache").is_none());
    assert!(snapshot.header("status").is_none());
}

#[tokio::test]
async fn test_revalidation_serves_stored_body_with_markers() {
    let h = filtered(MockUpstream::resource(Resource::shared("\"v1\"", "hello")));
    h.cache.fetch(Request::get(URL)).await.unwrap();

    let response = h.cache.fetch(Request::get(URL)).await.unwrap();

    assert_eq!(h.upstream.calls(), 2);
    assert_eq!(
        h.upstream.last_request().headers().get(IF_NONE_MATCH).unwrap(),
        "\"v1\""
    );
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"hello");
    assert_eq!(response.header_str("x-from-cache"), Some("1"));
    assert_eq!(response.header_str("status"), Some("304 Not Modified"));
    assert_eq!(response.header_str("x-conditional-request"), Some("\"v1\""));

    // Markers never reach the store, even after a merge.
    let snapshot = stored(&h.store, URL);
    assert!(snapshot.header("status").is_none());
    assert!(snapshot.header("x-conditional-request").is_none());
}

#[tokio::test]
async fn test_changed_resource_replaces_snapshot() {
    let resource = Resource::shared("\"v1\"", "old");
    let h = filtered(MockUpstream::resource(resource.clone()));
    h.cache.fetch(Request::get(URL)).await.unwrap();

    {
        let mut current = resource.lock().unwrap();
        current.etag = "\"v2\"".to_string();
        current.body = "new".to_string();
    }
    let response = h.cache.fetch(Request::get(URL)).await.unwrap();

    assert_eq!(response.body().as_ref(), b"new");
    assert!(response.header_str("x-from-cache").is_none());
    assert_eq!(response.header_str("x-conditional-request"), Some("\"v1\""));
    assert_eq!(stored(&h.store, URL).header("etag"), Some("\"v2\""));
}

#[tokio::test]
async fn test_last_modified_is_sent_as_if_modified_since() {
    let h = harness(MockUpstream::new(|_| {
        Ok(Response::new(StatusCode::OK)
            .with_header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .with_header(LAST_MODIFIED, HeaderValue::from_static("Tue, 01 Sep 2026 10:00:00 GMT"))
            .with_body("body"))
    }));
    h.cache.fetch(Request::get(URL)).await.unwrap();
    h.cache.fetch(Request::get(URL)).await.unwrap();

    let sent = h.upstream.last_request();
    assert_eq!(
        sent.headers().get(IF_MODIFIED_SINCE).unwrap(),
        "Tue, 01 Sep 2026 10:00:00 GMT"
    );
    assert!(sent.headers().get(IF_NONE_MATCH).is_none());
}

#[tokio::test]
async fn test_caller_validators_are_not_overwritten() {
    let h = filtered(MockUpstream::resource(Resource::shared("\"v1\"", "hello")));
    h.cache.fetch(Request::get(URL)).await.unwrap();

    let request =
        Request::get(URL).with_header(IF_NONE_MATCH, HeaderValue::from_static("\"mine\""));
    h.cache.fetch(request).await.unwrap();

    assert_eq!(
        h.upstream.last_request().headers().get(IF_NONE_MATCH).unwrap(),
        "\"mine\""
    );
}

#[tokio::test]
async fn test_not_modified_without_snapshot_is_passed_through() {
    let h = filtered(MockUpstream::resource(Resource::shared("\"v1\"", "hello")));
    let conditional =
        Request::get(URL).with_header(IF_NONE_MATCH, HeaderValue::from_static("\"v1\""));

    let response = h.cache.fetch(conditional).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert!(response.body().is_empty());
    assert!(response.header_str("x-from-cache").is_none());
    assert_eq!(h.store.len(), 0);

    let response = h.cache.fetch(Request::get(URL)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"hello");
    assert_eq!(stored(&h.store, URL).status, 200);
}

#[tokio::test]
async fn test_not_modified_merges_end_to_end_headers_only() {
    let h = harness(MockUpstream::new(|request| {
        if request.headers().contains_key(IF_NONE_MATCH) {
            return Ok(Response::new(StatusCode::NOT_MODIFIED)
                .with_header(ETAG, HeaderValue::from_static("\"v1\""))
                .with_header(
                    HeaderName::from_static("x-ratelimit-remaining"),
                    HeaderValue::from_static("4999"),
                )
                .with_header(CONNECTION, HeaderValue::from_static("x-hop"))
                .with_header(
                    HeaderName::from_static("x-hop"),
                    HeaderValue::from_static("drop me"),
                )
                .with_header(
                    HeaderName::from_static("keep-alive"),
                    HeaderValue::from_static("timeout=5"),
                ));
        }
        Ok(Response::new(StatusCode::OK)
            .with_header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .with_header(ETAG, HeaderValue::from_static("\"v1\""))
            .with_header(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from_static("5000"),
            )
            .with_body("payload"))
    }));
    h.cache.fetch(Request::get(URL)).await.unwrap();

    let response = h.cache.fetch(Request::get(URL)).await.unwrap();

    assert_eq!(response.body().as_ref(), b"payload");
    assert_eq!(response.header_str("x-ratelimit-remaining"), Some("4999"));
    assert_eq!(response.header_str("cache-control"), Some("no-cache"));
    assert!(response.header_str("x-hop").is_none());
    assert!(response.header_str("keep-alive").is_none());
    assert!(response.header_str("connection").is_none());
}

#[tokio::test]
async fn test_error_status_on_revalidation_drops_snapshot() {
    let resource = Resource::shared("\"v1\"", "hello");
    let served = std::sync::atomic::AtomicBool::new(false);
    let h = filtered(MockUpstream::new(move |_| {
        if served.swap(true, std::sync::atomic::Ordering::SeqCst) {
            return Ok(Response::new(StatusCode::NOT_FOUND));
        }
        let current = resource.lock().unwrap().clone();
        Ok(Response::new(StatusCode::OK)
            .with_header(ETAG, HeaderValue::from_str(&current.etag).unwrap())
            .with_body(current.body))
    }));
    h.cache.fetch(Request::get(URL)).await.unwrap();
    assert_eq!(h.store.len(), 1);

    let response = h.cache.fetch(Request::get(URL)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.header_str("cache-control"), Some("no-store"));
    assert_eq!(h.store.len(), 0);
}

#[tokio::test]
async fn test_transport_error_on_revalidation_drops_snapshot() {
    let served = std::sync::atomic::AtomicBool::new(false);
    let h = harness(MockUpstream::new(move |_| {
        if served.swap(true, std::sync::atomic::Ordering::SeqCst) {
            return Err(Error::upstream("connection reset"));
        }
        Ok(Response::new(StatusCode::OK)
            .with_header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .with_header(ETAG, HeaderValue::from_static("\"v1\"")))
    }));
    h.cache.fetch(Request::get(URL)).await.unwrap();

    let err = h.cache.fetch(Request::get(URL)).await.unwrap_err();

    assert!(err.is_upstream());
    assert_eq!(h.store.len(), 0);
}

#[tokio::test]
async fn test_errors_are_never_stored() {
    let h = filtered(MockUpstream::status(StatusCode::INTERNAL_SERVER_ERROR));

    h.cache.fetch(Request::get(URL)).await.unwrap();
    h.cache.fetch(Request::get(URL)).await.unwrap();

    assert_eq!(h.store.len(), 0);
    assert!(h.upstream.last_request().headers().get(IF_NONE_MATCH).is_none());
}

#[tokio::test]
async fn test_only_if_cached_without_snapshot_is_gateway_timeout() {
    let h = filtered(MockUpstream::ok("body"));
    let request =
        Request::get(URL).with_header(CACHE_CONTROL, HeaderValue::from_static("only-if-cached"));

    let response = h.cache.fetch(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(h.upstream.calls(), 0);
    assert_eq!(h.store.len(), 0);
}

#[tokio::test]
async fn test_unreadable_snapshot_is_treated_as_miss() {
    let h = filtered(MockUpstream::resource(Resource::shared("\"v1\"", "hello")));
    h.store.insert_raw(URL, b"{not json");

    let response = h.cache.fetch(Request::get(URL)).await.unwrap();

    assert_eq!(response.body().as_ref(), b"hello");
    assert!(h.upstream.last_request().headers().get(IF_NONE_MATCH).is_none());
    assert_eq!(stored(&h.store, URL).header("etag"), Some("\"v1\""));
}

#[tokio::test]
async fn test_vary_mismatch_skips_snapshot() {
    let h = harness(MockUpstream::new(|_| {
        Ok(Response::new(StatusCode::OK)
            .with_header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .with_header(ETAG, HeaderValue::from_static("\"v1\""))
            .with_header(VARY, HeaderValue::from_static("Accept"))
            .with_body("json"))
    }));
    let accept = |value: &'static str| {
        Request::get(URL).with_header(http::header::ACCEPT, HeaderValue::from_static(value))
    };
    h.cache.fetch(accept("application/json")).await.unwrap();

    h.cache.fetch(accept("text/html")).await.unwrap();
    assert!(h.upstream.last_request().headers().get(IF_NONE_MATCH).is_none());

    h.cache.fetch(accept("text/html")).await.unwrap();
    assert_eq!(
        h.upstream.last_request().headers().get(IF_NONE_MATCH).unwrap(),
        "\"v1\""
    );
}

#[tokio::test]
async fn test_fresh_snapshot_is_served_without_upstream_call() {
    let h = harness(MockUpstream::new(|_| {
        Ok(Response::new(StatusCode::OK)
            .with_header(CACHE_CONTROL, HeaderValue::from_static("max-age=600"))
            .with_body("fresh"))
    }));
    h.cache.fetch(Request::get(URL)).await.unwrap();

    let response = h.cache.fetch(Request::get(URL)).await.unwrap();

    assert_eq!(h.upstream.calls(), 1);
    assert_eq!(response.body().as_ref(), b"fresh");
    assert_eq!(response.header_str("x-from-cache"), Some("1"));
    assert!(response.header_str("status").is_none());
}

#[tokio::test]
async fn test_request_no_cache_forces_revalidation() {
    let h = harness(MockUpstream::new(|_| {
        Ok(Response::new(StatusCode::OK)
            .with_header(CACHE_CONTROL, HeaderValue::from_static("max-age=600"))
            .with_header(ETAG, HeaderValue::from_static("\"v1\"")))
    }));
    h.cache.fetch(Request::get(URL)).await.unwrap();

    let request =
        Request::get(URL).with_header(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    h.cache.fetch(request).await.unwrap();

    assert_eq!(h.upstream.calls(), 2);
}

#[tokio::test]
async fn test_request_no_store_is_not_persisted() {
    let h = filtered(MockUpstream::ok("body"));
    let request =
        Request::get(URL).with_header(CACHE_CONTROL, HeaderValue::from_static("no-store"));

    h.cache.fetch(request).await.unwrap();

    assert_eq!(h.store.len(), 0);
}

#[tokio::test]
async fn test_mutations_and_ranges_bypass_the_store() {
    let h = filtered(MockUpstream::ok("body"));

    h.cache.fetch(Request::new(Method::POST, URL).with_body("{}")).await.unwrap();
    let range = HeaderValue::from_static("bytes=0-1");
    h.cache
        .fetch(Request::get(URL).with_header(http::header::RANGE, range))
        .await
        .unwrap();

    assert_eq!(h.upstream.calls(), 2);
    assert_eq!(h.store.len(), 0);
}

#[tokio::test]
async fn test_head_requests_use_their_own_store_key() {
    let h = filtered(MockUpstream::ok(""));

    h.cache.fetch(Request::new(Method::HEAD, URL)).await.unwrap();

    assert!(h.store.raw(&format!("HEAD {URL}")).is_some());
    assert!(h.store.raw(URL).is_none());
}
