//! CME exchange calendar for listed futures.

use super::bitmap::{HolidayBitmap, HolidayCalendarBuilder, Observance, MAX_YEAR, MIN_YEAR};
use super::TradingCalendar;
use crate::types::Date;

/// Trading calendar for CME-listed futures, evaluated at midday Chicago time.
///
/// ## Full closures
///
/// - New Year's Day (January 1; Sunday observed Monday)
/// - Good Friday (Friday before Easter)
/// - Christmas Day (December 25; observed on the nearest weekday)
///
/// ## Open at midday (early close, not modeled as holidays)
///
/// Martin Luther King Jr. Day, Presidents' Day, Memorial Day, Juneteenth,
/// Independence Day, Labor Day and Thanksgiving all trade until at least noon
/// and therefore count as trading days.
#[derive(Debug, Clone)]
pub struct CmeCalendar {
    bitmap: HolidayBitmap,
}

impl CmeCalendar {
    /// Create a new CME calendar.
    pub fn new() -> Self {
        Self {
            bitmap: build_cme_holidays(),
        }
    }
}

impl Default for CmeCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl TradingCalendar for CmeCalendar {
    fn name(&self) -> &'static str {
        "CME"
    }

    fn is_trading_day(&self, date: Date) -> bool {
        self.bitmap.is_open(date)
    }
}

fn build_cme_holidays() -> HolidayBitmap {
    HolidayCalendarBuilder::new("CME")
        .year_range(MIN_YEAR, MAX_YEAR)
        .add_fixed_holiday(1, 1, Observance::SundayToMonday)
        .add_easter_holiday(-2)
        .add_fixed_holiday(12, 25, Observance::NearestWeekday)
        .build()
}
