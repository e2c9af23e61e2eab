//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::commands::{ChainArgs, CombineArgs, DistributionArgs, MaskArgs, ScheduleArgs};

/// Contango - Futures term structure analytics CLI
#[derive(Parser)]
#[command(name = "contango")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "CONTANGO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the delivery dates of the futures chain
    Schedule(ScheduleArgs),

    /// Combine a snapshot directory into aggregate and change tables
    Combine(CombineArgs),

    /// Export the term structure mask for a trade date
    Mask(MaskArgs),

    /// Running extremes and percentile rank of a price series
    Distribution(DistributionArgs),

    /// Contract tickers for a trade date
    Chain(ChainArgs),

    /// Show the effective configuration
    Config,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

/// Trading calendar choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarChoice {
    /// CME Globex full closures
    #[default]
    Cme,
    /// Weekends only
    Weekend,
}
