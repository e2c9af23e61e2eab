//! Distribution command implementation.
//!
//! Running extremes and trailing percentile rank of a dated price series,
//! such as the spot index history.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use contango_analytics::{track, DistributionParams, DistributionSnapshot};
use contango_core::Date;
use contango_ext_file::{read_price_series, write_distribution};
use rust_decimal::Decimal;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::output::{print_output, print_success, print_warning};

/// Arguments for the distribution command.
#[derive(Args, Debug)]
pub struct DistributionArgs {
    /// Series file with a `Trade Date` column
    #[arg(short, long)]
    pub series: PathBuf,

    /// Value column. Defaults to the configured column.
    #[arg(long)]
    pub column: Option<String>,

    /// Trailing window in rows. Defaults to the configured window.
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Number of most recent rows to display
    #[arg(short, long, default_value = "10")]
    pub tail: usize,

    /// Write the full distribution to this CSV file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// One displayed row.
#[derive(Debug, Serialize, Tabled)]
struct DistributionRow {
    #[tabled(rename = "Date")]
    date: Date,
    #[tabled(rename = "Value")]
    value: Decimal,
    #[tabled(rename = "Max")]
    max: Decimal,
    #[tabled(rename = "Min")]
    min: Decimal,
    #[tabled(rename = "Pctl")]
    percentile: u8,
    #[tabled(rename = "Max date")]
    max_date: Date,
    #[tabled(rename = "Min date")]
    min_date: Date,
}

impl From<&DistributionSnapshot> for DistributionRow {
    fn from(snap: &DistributionSnapshot) -> Self {
        Self {
            date: snap.date,
            value: snap.value,
            max: snap.max,
            min: snap.min,
            percentile: snap.percentile,
            max_date: snap.max_date,
            min_date: snap.min_date,
        }
    }
}

/// Executes the distribution command.
pub fn execute(args: DistributionArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let column = args
        .column
        .unwrap_or_else(|| config.distribution.value_column.clone());
    let window = args.window.unwrap_or(config.distribution.window);

    let series = read_price_series(&args.series, &column)?;
    if series.is_empty() {
        print_warning(&format!("no '{column}' values in {}", args.series.display()));
    }
    let snapshots = track(&series, &DistributionParams::new(window))?;

    let skip = snapshots.len().saturating_sub(args.tail);
    let rows: Vec<DistributionRow> = snapshots[skip..].iter().map(DistributionRow::from).collect();
    print_output(&rows, format)?;

    if let Some(path) = args.out {
        write_distribution(&path, &column, &snapshots)?;
        print_success(&format!("{} rows written to {}", snapshots.len(), path.display()));
    }
    Ok(())
}
