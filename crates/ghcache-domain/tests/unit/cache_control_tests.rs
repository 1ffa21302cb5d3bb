//! Cache-Control Parsing Tests

use ghcache_domain::value_objects::CacheControl;
use http::HeaderMap;
use http::header::{CACHE_CONTROL, HeaderValue};

fn headers(values: &[&'static str]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for value in values {
        map.append(CACHE_CONTROL, HeaderValue::from_static(value));
    }
    map
}

#[test]
fn test_parses_directives_across_values() {
    let cc = CacheControl::from_headers(&headers(&["private, max-age=60", "No-Cache"]));

    assert!(cc.has("private"));
    assert!(cc.has("no-cache"));
    assert_eq!(cc.max_age(), Some(60));
    assert!(!cc.has("no-store"));
}

#[test]
fn test_quoted_and_invalid_max_age() {
    assert_eq!(
        CacheControl::from_headers(&headers(&["max-age=\"30\""])).max_age(),
        Some(30)
    );
    assert_eq!(
        CacheControl::from_headers(&headers(&["max-age=soon"])).max_age(),
        None
    );
}

#[test]
fn test_empty_headers() {
    let cc = CacheControl::from_headers(&HeaderMap::new());
    assert!(cc.is_empty());
    assert_eq!(cc.max_age(), None);
}
