//! Date type for trade and delivery dates.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ContangoError, ContangoResult};

/// ISO format used for trade dates, delivery dates, and snapshot file names.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date.
///
/// Newtype over `chrono::NaiveDate`. Ordering is chronological, which is also
/// the lexical order of the `YYYY-MM-DD` rendering used in snapshot file names.
///
/// # Example
///
/// ```rust
/// use contango_core::types::Date;
///
/// let date = Date::parse("2020-09-16").unwrap();
/// assert_eq!(date.add_days(-30).to_string(), "2020-08-17");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `ContangoError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> ContangoResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| ContangoError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ContangoError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> ContangoResult<Self> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Date)
            .map_err(|_| ContangoError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Adds a number of days to the date, saturating at the bounds of the
    /// representable range.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        self.checked_add_days(days).unwrap_or(if days < 0 {
            Date(NaiveDate::MIN)
        } else {
            Date(NaiveDate::MAX)
        })
    }

    /// Adds a number of days to the date.
    ///
    /// # Errors
    ///
    /// Returns `ContangoError::InvalidDate` if the result is out of range.
    pub fn checked_add_days(&self, days: i64) -> ContangoResult<Self> {
        chrono::Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Date)
            .ok_or_else(|| ContangoError::invalid_date(format!("{self} + {days} days is out of range")))
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns the first date on or after `self` falling on `weekday`.
    #[must_use]
    pub fn next_or_same(&self, weekday: Weekday) -> Self {
        let ahead = (weekday.num_days_from_monday() as i64
            - self.weekday().num_days_from_monday() as i64)
            .rem_euclid(7);
        self.add_days(ahead)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for Date {
    type Err = ContangoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}
