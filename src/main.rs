//! depscan - dependency ledger and usage report for Python projects.

mod analyzer;
mod cli;
mod commands;
mod config;
mod manifests;
mod remote;
mod report;
mod scanner;
mod types;
mod walk;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so report paths on stdout stay clean (controlled by RUST_LOG)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    cli.command.execute()
}
