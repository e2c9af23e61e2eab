//! Enumerated set of trading dates.

use std::collections::BTreeSet;
use std::ops::Bound;

use super::TradingCalendar;
use crate::types::Date;

/// Ordered set of the trading dates in a range.
///
/// Produced by [`TradingCalendar::trading_days`] and used both as a membership
/// predicate and as the row index of a term-structure mask.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradingDays {
    days: BTreeSet<Date>,
}

impl TradingDays {
    /// Builds the set from an ascending list of dates.
    pub(crate) fn from_sorted(days: Vec<Date>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    /// Number of trading days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Earliest trading day.
    pub fn first(&self) -> Option<Date> {
        self.days.first().copied()
    }

    /// Latest trading day.
    pub fn last(&self) -> Option<Date> {
        self.days.last().copied()
    }

    /// Returns true if `date` is in the set.
    pub fn contains(&self, date: Date) -> bool {
        self.days.contains(&date)
    }

    /// Iterates the trading days in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Date> + '_ {
        self.days.iter().copied()
    }

    /// Trading days in `(lower, upper]`; `None` leaves the lower end open.
    pub fn between(&self, lower: Option<Date>, upper: Date) -> impl Iterator<Item = Date> + '_ {
        let start = lower.map_or(Bound::Unbounded, Bound::Excluded);
        let end = match lower {
            Some(lower) if lower >= upper => Bound::Included(lower),
            _ => Bound::Included(upper),
        };
        self.days
            .range((start, end))
            .copied()
            .filter(move |d| *d <= upper)
    }
}

impl FromIterator<Date> for TradingDays {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

impl TradingCalendar for TradingDays {
    fn name(&self) -> &'static str {
        "Enumerated"
    }

    fn is_trading_day(&self, date: Date) -> bool {
        self.contains(date)
    }

    /// Latest enumerated day in `[date - max_days, date]`.
    fn previous_trading_day(&self, date: Date, max_days: u32) -> Option<Date> {
        let earliest = date.add_days(-i64::from(max_days));
        self.days.range(earliest..=date).next_back().copied()
    }
}
