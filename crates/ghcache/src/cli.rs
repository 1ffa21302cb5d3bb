//! Command line front end
//!
//! Fetches URLs through a configured [`CacheService`] and prints one line
//! per response. Useful for checking that repeated runs are revalidated
//! rather than refetched.

use std::path::PathBuf;

use clap::Parser;
use futures::future::join_all;
use ghcache_application::CacheService;
use ghcache_domain::Request;
use ghcache_infrastructure::config::ConfigLoader;
use ghcache_infrastructure::logging::init_logging;
use ghcache_infrastructure::{CacheRuntime, bootstrap};
use tracing::debug;

/// Command line interface for ghcache
#[derive(Parser, Debug)]
#[command(name = "ghcache")]
#[command(about = "Coalescing, always-revalidating cache for token-limited HTTP APIs")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// URLs to fetch
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Number of sequential rounds over all URLs
    #[arg(long, default_value_t = 1)]
    pub repeat: usize,

    /// Concurrent fetches of each URL per round
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Print the Prometheus exposition after the last round
    #[arg(long)]
    pub metrics: bool,
}

/// Load configuration, initialize logging and run the fetch rounds
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;

    let runtime = bootstrap(&config).await?;
    let mut out = std::io::stdout();
    run_rounds(&runtime.service, &cli, &mut out).await?;

    if cli.metrics {
        print_metrics(&runtime, &mut out)?;
    }
    Ok(())
}

/// Fetch every URL `concurrency` times per round, for `repeat` rounds
pub async fn run_rounds(
    service: &CacheService,
    cli: &Cli,
    out: &mut impl std::io::Write,
) -> anyhow::Result<()> {
    for round in 1..=cli.repeat.max(1) {
        debug!(round, "Starting fetch round");
        let fetches = cli.urls.iter().flat_map(|url| {
            (0..cli.concurrency.max(1)).map(move |_| async move {
                (url, service.fetch_with_mode(Request::get(url.as_str())).await)
            })
        });

        for (url, result) in join_all(fetches).await {
            match result {
                Ok((response, mode)) => writeln!(
                    out,
                    "{round}\t{}\t{mode}\t{}\t{url}",
                    response.status().as_u16(),
                    response.body().len(),
                )?,
                Err(e) => writeln!(out, "{round}\t-\tERROR\t0\t{url}\t{e}")?,
            }
        }
    }
    Ok(())
}

fn print_metrics(runtime: &CacheRuntime, out: &mut impl std::io::Write) -> anyhow::Result<()> {
    match &runtime.metrics {
        Some(metrics) => write!(out, "{}", metrics.render()?)?,
        None => writeln!(out, "# metrics disabled")?,
    }
    Ok(())
}
