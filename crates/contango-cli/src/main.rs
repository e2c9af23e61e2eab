//! Contango CLI - Command-line driver for futures term structure analytics.
//!
//! # Usage
//!
//! ```bash
//! # List delivery dates on the CME calendar
//! contango schedule --start 2013-01-01 --end 2021-02-24
//!
//! # Combine the snapshot directory into aggregate and change tables
//! contango combine --data-dir ./data/vix --out ./output
//!
//! # Export the term structure mask for a trade date, shifted for the roll
//! contango mask --date 2020-09-17 --shift --out mask.csv
//!
//! # Running extremes and percentile rank of an index series
//! contango distribution --series ./data/VIX.csv --column "VIX Close"
//!
//! # Contract tickers for the current settlement day
//! contango chain --root GC --exchange CMX
//! ```
//!
//! Logging goes to stderr and honours `RUST_LOG`.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "error"
    } else {
        "warn,contango=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    tracing::debug!(?config, "configuration loaded");

    let format = cli.format;

    match cli.command {
        Commands::Schedule(args) => commands::schedule::execute(args, &config, format)?,
        Commands::Combine(args) => commands::combine::execute(args, &config, format)?,
        Commands::Mask(args) => commands::mask::execute(args, &config, format)?,
        Commands::Distribution(args) => commands::distribution::execute(args, &config, format)?,
        Commands::Chain(args) => commands::chain::execute(args, &config, format)?,
        Commands::Config => commands::show_config(&config)?,
    }

    Ok(())
}
