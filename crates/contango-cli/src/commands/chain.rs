//! Chain command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use contango_core::schedule::futures_chain;

use crate::cli::OutputFormat;
use crate::commands::date_or_settlement_day;
use crate::config::AppConfig;
use crate::output::print_output;

/// Arguments for the chain command.
#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Contract root symbol (e.g. GC)
    #[arg(short, long)]
    pub root: String,

    /// Exchange suffix (e.g. CMX)
    #[arg(short, long)]
    pub exchange: String,

    /// Trade date (YYYY-MM-DD). Defaults to the settlement day.
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Tabled)]
struct TickerRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Ticker")]
    ticker: String,
}

/// Executes the chain command.
pub fn execute(args: ChainArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let date = date_or_settlement_day(args.date.as_deref(), config)?;
    let tickers = futures_chain(&args.root, &args.exchange, date);

    if format == OutputFormat::Minimal {
        for ticker in &tickers {
            println!("{ticker}");
        }
        return Ok(());
    }

    let rows: Vec<TickerRow> = tickers
        .into_iter()
        .enumerate()
        .map(|(index, ticker)| TickerRow { index, ticker })
        .collect();
    print_output(&rows, format)
}
