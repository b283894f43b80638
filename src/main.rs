//! Wampa CLI - keep one document in sync with many sources
//!
//! Usage: wampa [-i <INPUT>]... [-o <OUTPUT>] [-c <CONFIG>]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod ui;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    commands::watch::cmd_watch(&cli)
}

/// Log to stderr. `WAMPA_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env("WAMPA_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
