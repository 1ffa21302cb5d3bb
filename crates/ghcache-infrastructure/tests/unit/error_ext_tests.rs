//! Error context extension tests

use std::error::Error as _;
use std::io;

use ghcache_domain::Error;
use ghcache_infrastructure::ErrorContext;

fn failing() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
}

#[test]
fn test_io_context_keeps_source() {
    let err = failing().io_context("Failed to read cache").unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("Failed to read cache: no such file"));
    assert!(err.source().is_some());
}

#[test]
fn test_config_context_is_configuration_error() {
    let err = failing().config_context("Bad config").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_cache_context_is_cache_error() {
    let err = failing().cache_context("Store unavailable").unwrap_err();
    assert!(matches!(err, Error::Cache { .. }));
}

#[test]
fn test_with_context_is_lazy() {
    let mut evaluated = false;
    let ok: Result<u8, io::Error> = Ok(1);

    let value = ok
        .with_context(|| {
            evaluated = true;
            "never built"
        })
        .unwrap();

    assert_eq!(value, 1);
    assert!(!evaluated);
}
