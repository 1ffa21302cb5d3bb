//! ghcache - Entry Point
//!
//! Binary entry point; the work happens in [`ghcache::cli::run`].

use clap::Parser;
use ghcache::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run(Cli::parse()).await
}
