//! Binary crate for the `cityweather` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving the HTTP endpoint
//! - Logging setup

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod http;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
