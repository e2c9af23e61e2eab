//! Daily price tables for a single contract.

use std::collections::BTreeMap;
use std::ops::Bound;

use contango_core::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement and close prices for one trading date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRow {
    /// Official settlement price.
    pub settle: Option<Decimal>,
    /// Last traded price.
    pub close: Option<Decimal>,
}

impl PriceRow {
    /// Creates a price row.
    pub fn new(settle: Option<Decimal>, close: Option<Decimal>) -> Self {
        Self { settle, close }
    }

    /// Price used for projection.
    ///
    /// Settle when present and non-zero, otherwise close when present and
    /// non-zero. A row with neither has no price.
    pub fn value(&self) -> Option<Decimal> {
        let usable = |price: Option<Decimal>| price.filter(|p| !p.is_zero());
        usable(self.settle).or_else(|| usable(self.close))
    }
}

/// Prices of one contract keyed by trading date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    rows: BTreeMap<Date, PriceRow>,
}

impl PriceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row, replacing any earlier row for the same date.
    pub fn insert(&mut self, date: Date, row: PriceRow) -> Option<PriceRow> {
        self.rows.insert(date, row)
    }

    /// Row for `date`.
    pub fn get(&self, date: Date) -> Option<&PriceRow> {
        self.rows.get(&date)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest trading date.
    pub fn first_date(&self) -> Option<Date> {
        self.rows.keys().next().copied()
    }

    /// Latest trading date.
    pub fn last_date(&self) -> Option<Date> {
        self.rows.keys().next_back().copied()
    }

    /// Rows in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, &PriceRow)> + '_ {
        self.rows.iter().map(|(date, row)| (*date, row))
    }

    /// Rows in `(lower, upper]`; `None` leaves the lower end open.
    pub fn window(
        &self,
        lower: Option<Date>,
        upper: Date,
    ) -> impl Iterator<Item = (Date, &PriceRow)> + '_ {
        let start = lower.map_or(Bound::Unbounded, Bound::Excluded);
        let end = match lower {
            Some(lower) if lower >= upper => Bound::Included(lower),
            _ => Bound::Included(upper),
        };
        self.rows
            .range((start, end))
            .map(|(date, row)| (*date, row))
            .filter(move |(date, _)| *date <= upper)
    }
}

impl FromIterator<(Date, PriceRow)> for PriceTable {
    fn from_iter<I: IntoIterator<Item = (Date, PriceRow)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
