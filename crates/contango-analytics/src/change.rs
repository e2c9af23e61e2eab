//! Period-over-period change across maturity buckets.
//!
//! For each row of an aggregate matrix the change in column `i` is
//! `(c[i] - c[i-1]) / c[i-1]`, a fraction. Column 0 has no predecessor and is
//! dropped, so the table keeps columns `1..MATURITY_BUCKETS`. A zero
//! predecessor (inactive bucket) gives `None` rather than an infinity.

use std::collections::BTreeMap;
use std::ops::Index;

use contango_core::Date;
use contango_curves::{AggregateMatrix, MaturityRow, MATURITY_BUCKETS};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of columns in a change row.
pub const CHANGE_COLUMNS: usize = MATURITY_BUCKETS - 1;

/// Changes for one date; index `j` is the change into maturity column `j + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeRow([Option<Decimal>; CHANGE_COLUMNS]);

impl ChangeRow {
    /// Computes the changes across one matrix row.
    pub fn from_row(row: &MaturityRow) -> Self {
        let cells = row.cells();
        let mut changes = [None; CHANGE_COLUMNS];
        for (change, pair) in changes.iter_mut().zip(cells.windows(2)) {
            let (previous, current) = (pair[0], pair[1]);
            *change = (current - previous).checked_div(previous);
        }
        Self(changes)
    }

    /// Changes in column order.
    pub fn cells(&self) -> &[Option<Decimal>; CHANGE_COLUMNS] {
        &self.0
    }

    /// Change into maturity column `column` (`1..MATURITY_BUCKETS`).
    pub fn for_maturity(&self, column: usize) -> Option<Decimal> {
        column.checked_sub(1).and_then(|j| self.0.get(j).copied().flatten())
    }
}

impl Index<usize> for ChangeRow {
    type Output = Option<Decimal>;

    fn index(&self, index: usize) -> &Option<Decimal> {
        &self.0[index]
    }
}

/// Date-ordered table of [`ChangeRow`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeTable {
    rows: BTreeMap<Date, ChangeRow>,
}

impl ChangeTable {
    /// Row for `date`.
    pub fn get(&self, date: Date) -> Option<&ChangeRow> {
        self.rows.get(&date)
    }

    /// Rows in ascending date order.
    pub fn rows(&self) -> impl Iterator<Item = (Date, &ChangeRow)> + '_ {
        self.rows.iter().map(|(date, row)| (*date, row))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Change table with the same rows as `matrix`.
pub fn change_table(matrix: &AggregateMatrix) -> ChangeTable {
    ChangeTable {
        rows: matrix
            .rows()
            .map(|(date, row)| (date, ChangeRow::from_row(row)))
            .collect(),
    }
}
