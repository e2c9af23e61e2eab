//! Bitmap-backed holiday storage.
//!
//! One bit per day over a fixed year range gives constant-time membership
//! checks, which matters because the schedule generator and the mask builder
//! test every calendar day of a multi-year range.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::types::Date;

/// Minimum year supported by the bitmap.
pub const MIN_YEAR: i32 = 1990;
/// Maximum year supported by the bitmap.
pub const MAX_YEAR: i32 = 2100;

const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;
const MAX_DAYS_PER_YEAR: usize = 366;
const WORD_COUNT: usize = (YEAR_COUNT * MAX_DAYS_PER_YEAR + 63) / 64;

/// Holiday set over `MIN_YEAR..=MAX_YEAR` with Saturday/Sunday weekends.
///
/// Dates outside the supported range are never holidays.
#[derive(Clone)]
pub struct HolidayBitmap {
    name: &'static str,
    bits: Box<[u64; WORD_COUNT]>,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("name", &self.name)
            .field("holiday_count", &self.count_holidays())
            .finish()
    }
}

impl HolidayBitmap {
    /// Create an empty bitmap.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            bits: Box::new([0u64; WORD_COUNT]),
        }
    }

    /// Name of the calendar the bitmap was built for.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Mark a date as a holiday.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if let Some((word, bit)) = Self::indices(date) {
            self.bits[word] |= 1u64 << bit;
        }
    }

    /// Returns true if the date is a holiday (weekends excluded).
    #[inline]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        Self::indices(date).is_some_and(|(word, bit)| self.bits[word] & (1u64 << bit) != 0)
    }

    /// Returns true if the date is neither a weekend nor a holiday.
    #[inline]
    pub fn is_open(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_holiday(date.as_naive_date())
    }

    /// Count of holidays stored.
    pub fn count_holidays(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    fn indices(date: NaiveDate) -> Option<(usize, usize)> {
        let year = date.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        let position = (year - MIN_YEAR) as usize * MAX_DAYS_PER_YEAR + date.ordinal0() as usize;
        Some((position / 64, position % 64))
    }
}

/// Builder for holiday bitmaps from recurring rules.
pub struct HolidayCalendarBuilder {
    name: &'static str,
    holidays: BTreeSet<NaiveDate>,
    start_year: i32,
    end_year: i32,
}

impl HolidayCalendarBuilder {
    /// Create a new builder covering the full supported range.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            holidays: BTreeSet::new(),
            start_year: MIN_YEAR,
            end_year: MAX_YEAR,
        }
    }

    /// Restrict rule expansion to `start..=end`.
    pub fn year_range(mut self, start: i32, end: i32) -> Self {
        self.start_year = start.max(MIN_YEAR);
        self.end_year = end.min(MAX_YEAR);
        self
    }

    /// Add a fixed-date holiday, moved off weekends according to `observance`.
    pub fn add_fixed_holiday(mut self, month: u32, day: u32, observance: Observance) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(observance.apply(date));
            }
        }
        self
    }

    /// Add a holiday at a fixed offset from Easter Sunday (Good Friday is -2).
    pub fn add_easter_holiday(mut self, offset_days: i64) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = easter_sunday(year)
                .and_then(|e| e.checked_add_signed(chrono::Duration::days(offset_days)))
            {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Build the bitmap.
    pub fn build(self) -> HolidayBitmap {
        let mut bitmap = HolidayBitmap::new(self.name);
        for date in self.holidays {
            bitmap.add_holiday(date);
        }
        bitmap
    }
}

/// Weekend observance rule for fixed-date holidays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observance {
    /// Saturday moves to Friday, Sunday moves to Monday.
    NearestWeekday,
    /// Sunday moves to Monday; a Saturday holiday is not observed.
    SundayToMonday,
}

impl Observance {
    /// Date on which a holiday falling on `date` is observed.
    pub fn apply(self, date: NaiveDate) -> NaiveDate {
        match (self, date.weekday()) {
            (Observance::NearestWeekday, _) => observed_date(date),
            (Observance::SundayToMonday, Weekday::Sun) => date.succ_opt().unwrap_or(date),
            _ => date,
        }
    }
}

/// Observed date for a holiday that falls on a weekend.
///
/// Saturday moves to Friday, Sunday moves to Monday.
pub fn observed_date(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date.pred_opt().unwrap_or(date),
        Weekday::Sun => date.succ_opt().unwrap_or(date),
        _ => date,
    }
}

/// Easter Sunday by the Anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
