//! Trading calendars.
//!
//! This module provides:
//! - The [`TradingCalendar`] membership predicate consumed by the schedule
//!   generator and the term-structure mask
//! - An exchange calendar for CME-listed futures ([`CmeCalendar`])
//! - An enumerated set of trading dates over a range ([`TradingDays`])
//!
//! Calendars are passed explicitly to every function that needs one; there is
//! no process-wide calendar instance.

mod bitmap;
mod cme;
mod trading_days;

pub use bitmap::{
    easter_sunday, observed_date, HolidayBitmap, HolidayCalendarBuilder, Observance, MAX_YEAR,
    MIN_YEAR,
};
pub use cme::CmeCalendar;
pub use trading_days::TradingDays;

use crate::types::Date;

/// Trait for trading calendars.
///
/// A calendar answers one question: is the exchange open on a given date.
pub trait TradingCalendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the exchange trades on the date.
    fn is_trading_day(&self, date: Date) -> bool;

    /// Latest trading day on or before `date`, looking back at most
    /// `max_days` days; `None` if the exchange is closed throughout.
    fn previous_trading_day(&self, date: Date, max_days: u32) -> Option<Date> {
        (0..=i64::from(max_days))
            .map(|back| date.add_days(-back))
            .find(|day| self.is_trading_day(*day))
    }

    /// Enumerates the trading days in `[start, end]`.
    fn trading_days(&self, start: Date, end: Date) -> TradingDays {
        let mut days = Vec::new();
        let mut current = start;
        while current <= end {
            if self.is_trading_day(current) {
                days.push(current);
            }
            current = current.add_days(1);
        }
        TradingDays::from_sorted(days)
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl TradingCalendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_trading_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

impl<C: TradingCalendar + ?Sized> TradingCalendar for &C {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_trading_day(&self, date: Date) -> bool {
        (**self).is_trading_day(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert!(cal.is_trading_day(monday));

        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert!(!cal.is_trading_day(saturday));

        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        assert!(!cal.is_trading_day(sunday));
    }

    #[test]
    fn test_previous_trading_day_never_moves_forward() {
        let cal = WeekendCalendar;
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        assert_eq!(cal.previous_trading_day(sunday, 14), Some(friday));
        assert_eq!(cal.previous_trading_day(friday, 0), Some(friday));
        // Saturday and Sunday only, the walk stops before Friday
        assert_eq!(cal.previous_trading_day(sunday, 1), None);
    }

    #[test]
    fn test_trading_days_enumeration() {
        let cal = WeekendCalendar;
        let start = Date::from_ymd(2025, 1, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 14).unwrap();
        let days = cal.trading_days(start, end);
        assert_eq!(days.len(), 10);
        assert_eq!(days.first(), Some(start));
        assert_eq!(days.last(), Some(end));
    }
}
