//! Tests for cache mode recorders

use ghcache_domain::{CacheMode, ModeRecorder};
use ghcache_providers::metrics::{InMemoryModeRecorder, PrometheusModeRecorder};

#[test]
fn test_in_memory_counts_per_mode() {
    let recorder = InMemoryModeRecorder::new();

    recorder.record(CacheMode::Miss);
    recorder.record(CacheMode::Coalesced);
    recorder.record(CacheMode::Coalesced);

    assert_eq!(recorder.count(CacheMode::Miss), 1);
    assert_eq!(recorder.count(CacheMode::Coalesced), 2);
    assert_eq!(recorder.count(CacheMode::Error), 0);
    assert_eq!(recorder.total(), 3);
    assert_eq!(recorder.snapshot().len(), 2);
}

#[test]
fn test_prometheus_counter_is_labelled_by_mode() {
    let recorder = PrometheusModeRecorder::new("ghcache").unwrap();

    recorder.record(CacheMode::Revalidated);
    recorder.record(CacheMode::Revalidated);
    recorder.record(CacheMode::NoStore);

    assert_eq!(recorder.count(CacheMode::Revalidated), 2);
    assert_eq!(recorder.count(CacheMode::NoStore), 1);

    let text = recorder.render().unwrap();
    assert!(text.contains("ghcache_responses{mode=\"REVALIDATED\"} 2"));
    assert!(text.contains("ghcache_responses{mode=\"NO-STORE\"} 1"));
    assert!(text.contains("ghcache_responses{mode=\"MISS\"} 0"));
}

#[test]
fn test_prometheus_recorders_do_not_share_registries() {
    let first = PrometheusModeRecorder::new("ghcache").unwrap();
    let second = PrometheusModeRecorder::new("ghcache").unwrap();

    first.record(CacheMode::Miss);

    assert_eq!(first.count(CacheMode::Miss), 1);
    assert_eq!(second.count(CacheMode::Miss), 0);
}

#[test]
fn test_prometheus_rejects_invalid_namespace() {
    assert!(PrometheusModeRecorder::new("not a namespace").is_err());
}
