//! Delivery schedule generation.
//!
//! A futures chain is indexed by its delivery dates. For monthly volatility
//! futures the recorded delivery (roll-reference) date sits a fixed number of
//! days before the expiration on the third Friday of the following month; when
//! that Friday is not a trading day the expiration moves to the preceding
//! trading day, never forward.

mod chain;

pub use chain::{futures_chain, month_code, settlement_day, MONTH_CODES};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendars::{TradingCalendar, TradingDays};
use crate::error::{ContangoError, ContangoResult};
use crate::types::Date;

/// Longest walk back from a candidate expiration before giving up.
const MAX_ROLLBACK_DAYS: u32 = 14;

/// Parameters for [`DeliverySchedule::generate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleParams {
    /// First date considered (the first Friday on or after it starts the walk).
    pub start: Date,
    /// Walk stops before this date.
    pub end: Date,
    /// Days between the validated expiration and the recorded delivery date.
    pub roll_offset_days: i64,
    /// Which Friday of the month is the expiration (1-based).
    pub expiry_week: u32,
}

impl ScheduleParams {
    /// Default roll offset in days.
    pub const DEFAULT_ROLL_OFFSET_DAYS: i64 = 30;
    /// Default expiration week (third Friday).
    pub const DEFAULT_EXPIRY_WEEK: u32 = 3;
    /// Default forward horizon, about fourteen months.
    pub const DEFAULT_HORIZON_DAYS: i64 = 420;

    /// Parameters over `[start, end)` with the default offsets.
    pub fn new(start: Date, end: Date) -> Self {
        Self {
            start,
            end,
            roll_offset_days: Self::DEFAULT_ROLL_OFFSET_DAYS,
            expiry_week: Self::DEFAULT_EXPIRY_WEEK,
        }
    }

    /// Parameters from `start` to `horizon_days` after `today`.
    ///
    /// # Errors
    ///
    /// Returns `ContangoError::InvalidDate` if the horizon runs past the
    /// representable date range.
    pub fn with_horizon(start: Date, today: Date, horizon_days: i64) -> ContangoResult<Self> {
        Ok(Self::new(start, today.checked_add_days(horizon_days)?))
    }

    /// Sets the roll offset.
    pub fn roll_offset_days(mut self, days: i64) -> Self {
        self.roll_offset_days = days;
        self
    }

    /// Sets the expiration week.
    pub fn expiry_week(mut self, week: u32) -> Self {
        self.expiry_week = week;
        self
    }
}

/// Ascending delivery dates plus the trading calendar spanning them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliverySchedule {
    delivery_dates: Vec<Date>,
    trading_days: TradingDays,
}

impl DeliverySchedule {
    /// Generates the delivery dates between `params.start` and `params.end`.
    ///
    /// The first generated entry is dropped: it belongs to a contract that
    /// expired before the start of coverage.
    ///
    /// # Errors
    ///
    /// Returns `ContangoError::ScheduleError` if the range is inverted, the
    /// expiration week is out of `1..=5`, or no trading day precedes a
    /// candidate expiration within two weeks.
    pub fn generate<C>(params: &ScheduleParams, calendar: &C) -> ContangoResult<Self>
    where
        C: TradingCalendar + ?Sized,
    {
        if params.start > params.end {
            return Err(ContangoError::schedule_error(format!(
                "start {} is after end {}",
                params.start, params.end
            )));
        }
        if !(1..=5).contains(&params.expiry_week) {
            return Err(ContangoError::schedule_error(format!(
                "expiry week must be within 1..=5, got {}",
                params.expiry_week
            )));
        }

        let mut delivery_dates = Vec::new();
        let mut current = params.start.next_or_same(Weekday::Fri);
        let mut month_weeks = 0;

        while current < params.end {
            month_weeks += 1;
            if month_weeks == params.expiry_week {
                let expiration = roll_back_to_trading_day(current, calendar)?;
                let roll_offset = params.roll_offset_days.checked_neg().ok_or_else(|| {
                    ContangoError::schedule_error("roll offset is out of range")
                })?;
                delivery_dates.push(expiration.checked_add_days(roll_offset)?);
            }
            let next = current.add_days(7);
            if next.month() != current.month() {
                month_weeks = 0;
            }
            current = next;
        }

        if !delivery_dates.is_empty() {
            delivery_dates.remove(0);
        }

        tracing::debug!(
            calendar = calendar.name(),
            count = delivery_dates.len(),
            first = ?delivery_dates.first().map(ToString::to_string),
            last = ?delivery_dates.last().map(ToString::to_string),
            "delivery schedule generated"
        );

        Ok(Self {
            delivery_dates,
            trading_days: calendar.trading_days(params.start, params.end),
        })
    }

    /// Delivery dates in ascending order.
    pub fn delivery_dates(&self) -> &[Date] {
        &self.delivery_dates
    }

    /// Trading calendar spanning the schedule.
    pub fn trading_days(&self) -> &TradingDays {
        &self.trading_days
    }

    /// Last `times` delivery dates strictly before `date`, ascending.
    pub fn before(&self, date: Date, times: usize) -> &[Date] {
        last_before(&self.delivery_dates, date, times)
    }

    /// Splits the schedule into its parts.
    pub fn into_parts(self) -> (Vec<Date>, TradingDays) {
        (self.delivery_dates, self.trading_days)
    }
}

/// Last `times` entries of the ascending `dates` that are strictly before `date`.
pub fn last_before(dates: &[Date], date: Date, times: usize) -> &[Date] {
    let end = dates.partition_point(|d| *d < date);
    &dates[end.saturating_sub(times)..end]
}

fn roll_back_to_trading_day<C>(candidate: Date, calendar: &C) -> ContangoResult<Date>
where
    C: TradingCalendar + ?Sized,
{
    calendar
        .previous_trading_day(candidate, MAX_ROLLBACK_DAYS)
        .ok_or_else(|| {
            ContangoError::schedule_error(format!(
                "no trading day within {MAX_ROLLBACK_DAYS} days before {candidate}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{CmeCalendar, WeekendCalendar};

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_first_entries_from_2013() {
        let params = ScheduleParams::new(d("2013-01-01"), d("2013-06-30"));
        let schedule = DeliverySchedule::generate(&params, &CmeCalendar::new()).unwrap();
        let dates: Vec<String> = schedule
            .delivery_dates()
            .iter()
            .map(ToString::to_string)
            .collect();
        // 2013-06-21 is the last third Friday before the end; 2012-12-19 is dropped
        assert_eq!(
            dates,
            vec!["2013-01-16", "2013-02-13", "2013-03-20", "2013-04-17", "2013-05-22"]
        );
    }

    #[test]
    fn test_good_friday_expiration_walks_backward() {
        // 2014-04-18 is Good Friday; expiration moves to Thursday 2014-04-17
        let params = ScheduleParams::new(d("2014-03-01"), d("2014-05-01"));
        let schedule = DeliverySchedule::generate(&params, &CmeCalendar::new()).unwrap();
        assert_eq!(schedule.delivery_dates(), &[d("2014-03-18")]);

        let weekend_only = DeliverySchedule::generate(&params, &WeekendCalendar).unwrap();
        assert_eq!(weekend_only.delivery_dates(), &[d("2014-03-19")]);
    }

    #[test]
    fn test_inverted_range_is_an_error() {
        let params = ScheduleParams::new(d("2014-05-01"), d("2014-03-01"));
        let err = DeliverySchedule::generate(&params, &WeekendCalendar).unwrap_err();
        assert!(matches!(err, ContangoError::ScheduleError { .. }));
    }

    #[test]
    fn test_closed_calendar_is_an_error() {
        let closed = TradingDays::default();
        let params = ScheduleParams::new(d("2014-03-01"), d("2014-05-01"));
        assert!(DeliverySchedule::generate(&params, &closed).is_err());
    }

    #[test]
    fn test_trading_days_span_range() {
        let params = ScheduleParams::new(d("2013-01-01"), d("2013-01-31"));
        let schedule = DeliverySchedule::generate(&params, &CmeCalendar::new()).unwrap();
        let days = schedule.trading_days();
        assert_eq!(days.first(), Some(d("2013-01-02")));
        assert_eq!(days.last(), Some(d("2013-01-31")));
        assert_eq!(days.len(), 22);
    }

    #[test]
    fn test_last_before_is_strict_and_capped() {
        let dates = vec![d("2020-07-22"), d("2020-08-19"), d("2020-09-16"), d("2020-10-21")];
        assert_eq!(
            last_before(&dates, d("2020-09-16"), 12),
            &[d("2020-07-22"), d("2020-08-19")]
        );
        assert_eq!(last_before(&dates, d("2020-09-17"), 1), &[d("2020-09-16")]);
        assert!(last_before(&dates, d("2020-07-22"), 12).is_empty());
    }

    #[test]
    fn test_with_horizon() {
        let params = ScheduleParams::with_horizon(
            d("2013-01-01"),
            d("2020-01-01"),
            ScheduleParams::DEFAULT_HORIZON_DAYS,
        )
        .unwrap();
        assert_eq!(params.end, d("2021-02-24"));
        assert_eq!(params.roll_offset_days, 30);
        assert_eq!(params.expiry_week, 3);
    }

    #[test]
    fn test_out_of_range_horizon_is_an_error() {
        let err = ScheduleParams::with_horizon(d("2013-01-01"), d("2020-09-17"), 1_000_000_000_000)
            .unwrap_err();
        assert!(matches!(err, ContangoError::InvalidDate { .. }));
    }

    #[test]
    fn test_out_of_range_roll_offset_is_an_error() {
        let params = ScheduleParams::new(d("2014-03-01"), d("2014-05-01")).roll_offset_days(i64::MAX);
        assert!(DeliverySchedule::generate(&params, &WeekendCalendar).is_err());

        let params = ScheduleParams::new(d("2014-03-01"), d("2014-05-01")).roll_offset_days(i64::MIN);
        assert!(DeliverySchedule::generate(&params, &WeekendCalendar).is_err());
    }
}
