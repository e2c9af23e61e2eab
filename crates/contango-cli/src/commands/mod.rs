//! CLI command implementations.

pub mod chain;
pub mod combine;
pub mod distribution;
pub mod mask;
pub mod schedule;

// Re-export submodules for convenience
pub use chain::ChainArgs;
pub use combine::CombineArgs;
pub use distribution::DistributionArgs;
pub use mask::MaskArgs;
pub use schedule::ScheduleArgs;

use anyhow::Result;
use chrono::Local;
use contango_core::calendars::{CmeCalendar, WeekendCalendar};
use contango_core::schedule::{settlement_day, DeliverySchedule};
use contango_core::Date;

use crate::cli::CalendarChoice;
use crate::config::AppConfig;
use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an optional date argument, falling back to the settlement day.
pub fn date_or_settlement_day(arg: Option<&str>, config: &AppConfig) -> CliResult<Date> {
    match arg {
        Some(s) => parse_date(s),
        None => Ok(settlement_day(
            Local::now().naive_local(),
            config.settlement.cutoff_hour,
        )),
    }
}

/// Generates the delivery schedule over `[start, end)` on the chosen calendar.
pub fn build_schedule(
    config: &AppConfig,
    calendar: Option<CalendarChoice>,
    start: Date,
    end: Date,
) -> CliResult<DeliverySchedule> {
    let params = config.schedule.params(start, end);
    let schedule = match calendar.unwrap_or(config.schedule.calendar) {
        CalendarChoice::Cme => DeliverySchedule::generate(&params, &CmeCalendar::new())?,
        CalendarChoice::Weekend => DeliverySchedule::generate(&params, &WeekendCalendar)?,
    };
    Ok(schedule)
}

/// Schedule from the configured start to the horizon past `as_of`.
pub fn schedule_through(
    config: &AppConfig,
    calendar: Option<CalendarChoice>,
    as_of: Date,
) -> CliResult<DeliverySchedule> {
    let end = as_of.checked_add_days(config.schedule.horizon_days)?;
    build_schedule(config, calendar, config.schedule.start, end)
}

/// Prints the effective configuration as TOML.
pub fn show_config(config: &AppConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
