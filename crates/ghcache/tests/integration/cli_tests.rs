//! Command line front end tests

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use clap::Parser;
use ghcache::cli::{Cli, run_rounds};
use ghcache::domain::{Fetcher, Request, Response, Result};
use ghcache::infrastructure::new_mem_cache;
use http::StatusCode;
use http::header::{ETAG, HeaderValue, IF_NONE_MATCH};

const URL: &str = "https://api.github.com/repos/octo/hello";

#[derive(Default)]
struct SlowEtagUpstream {
    calls: AtomicUsize,
}

#[async_trait]
impl Fetcher for SlowEtagUpstream {
    async fn fetch(&self, request: Request) -> Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        let etag = HeaderValue::from_static("\"abc\"");
        if request.headers().get(IF_NONE_MATCH) == Some(&etag) {
            return Ok(Response::new(StatusCode::NOT_MODIFIED).with_header(ETAG, etag));
        }
        Ok(Response::new(StatusCode::OK)
            .with_header(ETAG, etag)
            .with_body("hello"))
    }
}

#[test]
fn test_cli_defaults() {
    let cli = Cli::try_parse_from(["ghcache", URL]).unwrap();

    assert_eq!(cli.urls, vec![URL.to_string()]);
    assert_eq!(cli.repeat, 1);
    assert_eq!(cli.concurrency, 1);
    assert!(!cli.metrics);
    assert!(cli.config.is_none());
}

#[test]
fn test_cli_requires_a_url() {
    assert!(Cli::try_parse_from(["ghcache"]).is_err());
}

#[tokio::test(start_paused = true)]
async fn test_rounds_report_mode_per_response() {
    let upstream = Arc::new(SlowEtagUpstream::default());
    let service = new_mem_cache(upstream.clone());
    let cli =
        Cli::try_parse_from(["ghcache", "--repeat", "2", "--concurrency", "3", URL]).unwrap();
    let mut out = Vec::new();

    run_rounds(&service, &cli, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("1\t200\tMISS\t5\t"));
    assert!(lines[1..3].iter().all(|l| l.starts_with("1\t200\tCOALESCED\t5\t")));
    assert!(lines[3].starts_with("2\t200\tREVALIDATED\t5\t"));
    assert!(lines[4..].iter().all(|l| l.starts_with("2\t200\tCOALESCED\t5\t")));
    assert_eq!(upstream.calls.load(Ordering::SeqCst), 2);
}
