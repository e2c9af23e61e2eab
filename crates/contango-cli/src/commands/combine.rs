//! Combine command implementation.
//!
//! Projects the newest snapshots of a directory onto the delivery schedule,
//! sums them into the aggregate matrix and derives the change table.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use contango_analytics::change_table;
use contango_curves::{CombineParams, MATURITY_BUCKETS};
use contango_ext_file::{combine_directory, write_change_table, write_matrix};
use rust_decimal::Decimal;

use crate::cli::{CalendarChoice, OutputFormat};
use crate::commands::{date_or_settlement_day, schedule_through};
use crate::config::AppConfig;
use crate::output::{format_change, print_header, print_output, print_success, KeyValue};

/// File name of the aggregate matrix.
pub const AGGREGATE_FILE: &str = "aggregate.csv";

/// File name of the change table.
pub const CHANGE_FILE: &str = "change.csv";

/// Arguments for the combine command.
#[derive(Args, Debug)]
pub struct CombineArgs {
    /// Snapshot directory. Defaults to the configured data directory.
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Output directory. Defaults to the configured output directory.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Maximum number of contributing snapshots
    #[arg(short, long)]
    pub max_times: Option<usize>,

    /// As-of date bounding the schedule (YYYY-MM-DD). Defaults to the
    /// settlement day.
    #[arg(long)]
    pub date: Option<String>,

    /// Trading calendar. Defaults to the configured calendar.
    #[arg(long, value_enum)]
    pub calendar: Option<CalendarChoice>,
}

/// One column of the latest term structure.
#[derive(Debug, Serialize, Tabled)]
struct TermRow {
    #[tabled(rename = "Maturity")]
    maturity: usize,
    #[tabled(rename = "Price")]
    price: Decimal,
    #[tabled(rename = "Change")]
    change: String,
}

/// Executes the combine command.
pub fn execute(args: CombineArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let as_of = date_or_settlement_day(args.date.as_deref(), config)?;
    let data_dir = args.data_dir.unwrap_or_else(|| config.data_dir.clone());
    let out_dir = args.out.unwrap_or_else(|| config.output_dir.clone());
    let params = CombineParams::new(args.max_times.unwrap_or(config.combine.max_times));

    let schedule = schedule_through(config, args.calendar, as_of)?;
    let aggregate = combine_directory(schedule.delivery_dates(), &data_dir, &params)?;
    let changes = change_table(&aggregate);

    fs::create_dir_all(&out_dir)?;
    let aggregate_path = out_dir.join(AGGREGATE_FILE);
    let change_path = out_dir.join(CHANGE_FILE);
    write_matrix(&aggregate_path, &aggregate)?;
    write_change_table(&change_path, &changes)?;

    let summary = vec![
        KeyValue::new("Rows", aggregate.len()),
        KeyValue::optional("First date", aggregate.first_date()),
        KeyValue::optional("Last date", aggregate.last_date()),
        KeyValue::new("Aggregate", aggregate_path.display()),
        KeyValue::new("Change", change_path.display()),
    ];

    print_output(&summary, format)?;
    if format != OutputFormat::Table {
        return Ok(());
    }

    if let Some((date, row)) = aggregate.rows().next_back() {
        let change_row = changes.get(date);
        let term: Vec<TermRow> = (0..MATURITY_BUCKETS)
            .map(|maturity| TermRow {
                maturity,
                price: row[maturity],
                change: format_change(change_row.and_then(|c| c.for_maturity(maturity))),
            })
            .collect();
        print_header(&format!("Term structure on {date}"));
        print_output(&term, format)?;
    }
    print_success(&format!("combined {} rows from {}", aggregate.len(), data_dir.display()));
    Ok(())
}
