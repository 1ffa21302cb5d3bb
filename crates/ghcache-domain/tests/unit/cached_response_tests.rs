//! Cached Response Snapshot Tests

use chrono::{Duration, Utc};
use ghcache_domain::constants::{STATUS_HEADER, X_CONDITIONAL_REQUEST, X_FROM_CACHE};
use ghcache_domain::{CachedResponse, Error, Request, Response};
use http::StatusCode;
use http::header::{ACCEPT, ETAG, HeaderName, HeaderValue, VARY};

fn sample_response() -> Response {
    Response::new(StatusCode::OK)
        .with_header(ETAG, HeaderValue::from_static("\"abc\""))
        .with_header(VARY, HeaderValue::from_static("Accept"))
        .with_header(
            HeaderName::from_static(X_CONDITIONAL_REQUEST),
            HeaderValue::from_static("\"old\""),
        )
        .with_header(
            HeaderName::from_static(STATUS_HEADER),
            HeaderValue::from_static("304 Not Modified"),
        )
        .with_header(
            HeaderName::from_static(X_FROM_CACHE),
            HeaderValue::from_static("1"),
        )
        .with_body("hello")
}

#[test]
fn test_capture_drops_coordination_headers() {
    let request = Request::get("https://api.github.com/repos");
    let snapshot = CachedResponse::capture(&sample_response(), &request, Utc::now());

    assert_eq!(snapshot.header("etag"), Some("\"abc\""));
    assert_eq!(snapshot.header(X_CONDITIONAL_REQUEST), None);
    assert_eq!(snapshot.header(STATUS_HEADER), None);
    assert_eq!(snapshot.header(X_FROM_CACHE), None);
}

#[test]
fn test_encode_decode_restores_response() {
    let request = Request::get("https://api.github.com/repos");
    let snapshot = CachedResponse::capture(&sample_response(), &request, Utc::now());

    let bytes = snapshot.encode().unwrap();
    let decoded = CachedResponse::decode(&bytes).unwrap();
    assert_eq!(decoded, snapshot);

    let response = decoded.to_response().unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.body().as_ref(), b"hello");
    assert_eq!(response.header_str("etag"), Some("\"abc\""));
}

#[test]
fn test_decode_garbage_is_read_error() {
    let err = CachedResponse::decode(b"not json").unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}

#[test]
fn test_invalid_body_is_read_error() {
    let request = Request::get("https://api.github.com/repos");
    let mut snapshot = CachedResponse::capture(&sample_response(), &request, Utc::now());
    snapshot.body = "***".to_string();

    assert!(matches!(snapshot.to_response(), Err(Error::Read { .. })));
}

#[test]
fn test_vary_matching() {
    let json = HeaderValue::from_static("application/json");
    let request = Request::get("https://api.github.com/repos").with_header(ACCEPT, json.clone());
    let snapshot = CachedResponse::capture(&sample_response(), &request, Utc::now());

    assert!(snapshot.vary_matches(&request));

    let other = Request::get("https://api.github.com/repos")
        .with_header(ACCEPT, HeaderValue::from_static("text/html"));
    assert!(!snapshot.vary_matches(&other));

    let missing = Request::get("https://api.github.com/repos");
    assert!(!snapshot.vary_matches(&missing));
}

#[test]
fn test_age() {
    let request = Request::get("https://api.github.com/repos");
    let stored_at = Utc::now() - Duration::seconds(90);
    let snapshot = CachedResponse::capture(&sample_response(), &request, stored_at);

    assert!(snapshot.age_secs(Utc::now()) >= 90);
    assert_eq!(snapshot.age_secs(stored_at - Duration::seconds(5)), 0);
}
