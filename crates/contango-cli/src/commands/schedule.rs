//! Schedule command implementation.
//!
//! Lists the delivery dates of the futures chain.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use contango_core::schedule::month_code;
use contango_core::Date;

use crate::cli::{CalendarChoice, OutputFormat};
use crate::commands::{build_schedule, date_or_settlement_day, parse_date};
use crate::config::AppConfig;
use crate::output::print_output;

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// First date of coverage (YYYY-MM-DD). Defaults to the configured start.
    #[arg(short, long)]
    pub start: Option<String>,

    /// End of coverage, exclusive (YYYY-MM-DD). Defaults to the horizon past
    /// the settlement day.
    #[arg(short, long)]
    pub end: Option<String>,

    /// Trading calendar. Defaults to the configured calendar.
    #[arg(long, value_enum)]
    pub calendar: Option<CalendarChoice>,
}

/// One delivery cycle.
#[derive(Debug, Serialize, Tabled)]
struct ScheduleRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Delivery")]
    delivery: Date,
    #[tabled(rename = "Expiration")]
    expiration: Date,
    #[tabled(rename = "Contract")]
    contract: String,
}

/// Executes the schedule command.
pub fn execute(args: ScheduleArgs, config: &AppConfig, format: OutputFormat) -> Result<()> {
    let start = match args.start.as_deref() {
        Some(s) => parse_date(s)?,
        None => config.schedule.start,
    };
    let end = match args.end.as_deref() {
        Some(s) => parse_date(s)?,
        None => date_or_settlement_day(None, config)?
            .checked_add_days(config.schedule.horizon_days)?,
    };

    let schedule = build_schedule(config, args.calendar, start, end)?;
    let rows: Vec<ScheduleRow> = schedule
        .delivery_dates()
        .iter()
        .enumerate()
        .map(|(index, &delivery)| {
            let expiration = delivery.add_days(config.schedule.roll_offset_days);
            let contract = month_code(expiration.month()).map_or_else(String::new, |code| {
                format!("{code}{:02}", expiration.year().rem_euclid(100))
            });
            ScheduleRow {
                index,
                delivery,
                expiration,
                contract,
            }
        })
        .collect();

    print_output(&rows, format)
}
