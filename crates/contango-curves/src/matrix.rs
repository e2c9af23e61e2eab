//! Maturity matrices.
//!
//! A maturity matrix maps each trading date to a fixed row of
//! [`MATURITY_BUCKETS`] cells, column 0 being the nearest upcoming delivery.
//! A matrix built from one contract carries at most one non-zero cell per row;
//! aggregates are element-wise sums of such matrices with absent cells read
//! as zero.

use std::collections::btree_map::{self, BTreeMap};
use std::ops::{Add, AddAssign, Index};

use contango_core::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of relative-maturity columns.
pub const MATURITY_BUCKETS: usize = 12;

/// One row of a maturity matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaturityRow([Decimal; MATURITY_BUCKETS]);

impl MaturityRow {
    /// Row of zeros.
    pub const ZERO: Self = Self([Decimal::ZERO; MATURITY_BUCKETS]);

    /// Creates a row from its cells.
    pub fn new(cells: [Decimal; MATURITY_BUCKETS]) -> Self {
        Self(cells)
    }

    /// Row holding `value` in `bucket` and zero elsewhere.
    ///
    /// Returns `None` if `bucket` is not a valid column.
    pub fn single(bucket: usize, value: Decimal) -> Option<Self> {
        let mut row = Self::ZERO;
        *row.0.get_mut(bucket)? = value;
        Some(row)
    }

    /// Cells in column order.
    pub fn cells(&self) -> &[Decimal; MATURITY_BUCKETS] {
        &self.0
    }

    /// Cell in `bucket`, `None` past the last column.
    pub fn get(&self, bucket: usize) -> Option<Decimal> {
        self.0.get(bucket).copied()
    }

    /// Returns true if every cell is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Decimal::is_zero)
    }

    /// First column holding a non-zero value.
    pub fn active_bucket(&self) -> Option<usize> {
        self.0.iter().position(|cell| !cell.is_zero())
    }

    /// Moves every column one place toward the front, dropping column 0.
    pub fn shift_front(&self) -> Self {
        let mut cells = [Decimal::ZERO; MATURITY_BUCKETS];
        cells[..MATURITY_BUCKETS - 1].copy_from_slice(&self.0[1..]);
        Self(cells)
    }
}

impl Index<usize> for MaturityRow {
    type Output = Decimal;

    fn index(&self, bucket: usize) -> &Decimal {
        &self.0[bucket]
    }
}

impl Add for MaturityRow {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for MaturityRow {
    fn add_assign(&mut self, rhs: Self) {
        for (cell, other) in self.0.iter_mut().zip(rhs.0) {
            *cell += other;
        }
    }
}

/// Trading date to [`MaturityRow`], ordered by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaturityMatrix {
    rows: BTreeMap<Date, MaturityRow>,
}

/// Sum of several maturity matrices; the same representation with zero fill.
pub type AggregateMatrix = MaturityMatrix;

impl MaturityMatrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row, returning the previous row for that date.
    pub fn insert(&mut self, date: Date, row: MaturityRow) -> Option<MaturityRow> {
        self.rows.insert(date, row)
    }

    /// Row for `date`.
    pub fn get(&self, date: Date) -> Option<&MaturityRow> {
        self.rows.get(&date)
    }

    /// Rows in ascending date order.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = (Date, &MaturityRow)> + '_ {
        self.rows.iter().map(|(date, row)| (*date, row))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the matrix has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest date.
    pub fn first_date(&self) -> Option<Date> {
        self.rows.keys().next().copied()
    }

    /// Latest date.
    pub fn last_date(&self) -> Option<Date> {
        self.rows.keys().next_back().copied()
    }

    /// First non-zero column of the row for `date`.
    pub fn active_bucket(&self, date: Date) -> Option<usize> {
        self.get(date).and_then(MaturityRow::active_bucket)
    }

    /// Element-wise sum of two matrices, zero-filling rows present on one side only.
    #[must_use]
    pub fn combine(&self, other: &MaturityMatrix) -> MaturityMatrix {
        let mut result = self.clone();
        result.accumulate(other);
        result
    }

    /// Adds `other` into this matrix in place.
    pub fn accumulate(&mut self, other: &MaturityMatrix) {
        for (date, row) in &other.rows {
            *self.rows.entry(*date).or_default() += *row;
        }
    }

    /// Sum of any number of matrices; the empty sum is the empty matrix.
    pub fn sum<I>(matrices: I) -> MaturityMatrix
    where
        I: IntoIterator<Item = MaturityMatrix>,
    {
        matrices
            .into_iter()
            .fold(MaturityMatrix::new(), |mut acc, matrix| {
                acc.accumulate(&matrix);
                acc
            })
    }

    /// Keeps only the rows for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(Date, &MaturityRow) -> bool,
    {
        self.rows.retain(|date, row| keep(*date, row));
    }
}

impl FromIterator<(Date, MaturityRow)> for MaturityMatrix {
    fn from_iter<I: IntoIterator<Item = (Date, MaturityRow)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MaturityMatrix {
    type Item = (Date, MaturityRow);
    type IntoIter = btree_map::IntoIter<Date, MaturityRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn row(bucket: usize, value: Decimal) -> MaturityRow {
        MaturityRow::single(bucket, value).unwrap()
    }

    #[test]
    fn test_single_row() {
        let r = row(3, dec!(21.5));
        assert_eq!(r[3], dec!(21.5));
        assert_eq!(r.active_bucket(), Some(3));
        assert_eq!(r.cells().iter().filter(|c| !c.is_zero()).count(), 1);
        assert!(MaturityRow::single(MATURITY_BUCKETS, dec!(1)).is_none());
    }

    #[test]
    fn test_shift_front() {
        let shifted = row(1, dec!(20)).shift_front();
        assert_eq!(shifted.active_bucket(), Some(0));
        assert!(row(0, dec!(20)).shift_front().is_zero());
        assert_eq!(
            row(11, dec!(20)).shift_front().active_bucket(),
            Some(10)
        );
    }

    #[test]
    fn test_combine_zero_fills() {
        let a: MaturityMatrix = [
            (d("2020-09-09"), row(0, dec!(25.10))),
            (d("2020-09-10"), row(0, dec!(26.00))),
        ]
        .into_iter()
        .collect();
        let b: MaturityMatrix = [
            (d("2020-09-10"), row(1, dec!(27.45))),
            (d("2020-09-11"), row(1, dec!(28.00))),
        ]
        .into_iter()
        .collect();

        let c = a.combine(&b);
        assert_eq!(c.len(), 3);
        assert_eq!(c.get(d("2020-09-09")), Some(&row(0, dec!(25.10))));
        let both = c.get(d("2020-09-10")).unwrap();
        assert_eq!(both[0], dec!(26.00));
        assert_eq!(both[1], dec!(27.45));
        assert_eq!(c.active_bucket(d("2020-09-11")), Some(1));
        assert_eq!(c.first_date(), Some(d("2020-09-09")));
        assert_eq!(c.last_date(), Some(d("2020-09-11")));
    }

    #[test]
    fn test_combine_with_empty_is_identity() {
        let a: MaturityMatrix = [(d("2020-09-10"), row(2, dec!(30)))].into_iter().collect();
        assert_eq!(a.combine(&MaturityMatrix::new()), a);
        assert_eq!(MaturityMatrix::new().combine(&a), a);
        assert_eq!(MaturityMatrix::sum(Vec::new()), MaturityMatrix::new());
    }

    #[test]
    fn test_serializes_as_date_keyed_map() {
        let a: MaturityMatrix = [(d("2020-09-10"), row(0, dec!(1)))].into_iter().collect();
        let json = serde_json::to_value(&a).unwrap();
        assert!(json.get("2020-09-10").is_some());
        let back: MaturityMatrix = serde_json::from_value(json).unwrap();
        assert_eq!(back, a);
    }
}
