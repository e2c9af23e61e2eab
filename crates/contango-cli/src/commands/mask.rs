//! Mask command implementation.
//!
//! Exports the term-structure mask for a trade date: one row per trading day
//! of the projection window with `1` in the row's maturity column. With
//! `--shift` the mask is moved back one delivery cycle, as used on the day a
//! new cycle starts.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use contango_core::Date;
use contango_curves::{shift_mask, term_structure_mask};
use contango_ext_file::write_matrix;

use crate::cli::{CalendarChoice, OutputFormat};
use crate::commands::{date_or_settlement_day, schedule_through};
use crate::config::AppConfig;
use crate::output::{print_output, print_success};

/// Arguments for the mask command.
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Trade date (YYYY-MM-DD). Defaults to the settlement day.
    #[arg(short, long)]
    pub date: Option<String>,

    /// Shift the mask back one delivery cycle
    #[arg(long)]
    pub shift: bool,

    /// Also write the mask rows to this CSV file
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Trading calendar. Defaults to the configured calendar.
    #[arg(long, value_enum)]
    pub calendar: Option<CalendarChoice>,
}

/// Trading days per maturity column.
#[derive(Debug, Serialize, Tabled)]
struct BucketRow {
    #[tabled(rename = "Maturity")]
    maturity: usize,
    #[tabled(rename = "Days")]
    days: usize,
    #[tabled(rename = "From")]
    from: Date,
    #[tabled(rename = "To")]
    to: Date,
}

/// Executes the mask command.
pub fn execute(args: MaskArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let tdate = date_or_settlement_day(args.date.as_deref(), config)?;
    let schedule = schedule_through(config, args.calendar, tdate)?;
    let (delivery_dates, trading_days) = (schedule.delivery_dates(), schedule.trading_days());

    let mut mask = term_structure_mask(delivery_dates, trading_days, tdate);
    if args.shift {
        mask = shift_mask(delivery_dates, trading_days, &mask)?;
    }

    let mut buckets: Vec<BucketRow> = Vec::new();
    for (date, row) in mask.rows() {
        let Some(maturity) = row.active_bucket() else {
            continue;
        };
        match buckets.iter_mut().find(|b| b.maturity == maturity) {
            Some(bucket) => {
                bucket.days += 1;
                bucket.to = date;
            }
            None => buckets.push(BucketRow {
                maturity,
                days: 1,
                from: date,
                to: date,
            }),
        }
    }
    buckets.sort_by_key(|b| b.maturity);

    print_output(&buckets, format)?;
    if let Some(path) = args.out {
        write_matrix(&path, &mask)?;
        print_success(&format!("{} mask rows written to {}", mask.len(), path.display()));
    }
    Ok(())
}
