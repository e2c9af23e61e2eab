//! Projecting one contract's prices into relative-maturity columns.
//!
//! The projector answers: for an as-of date, which delivery cycle was each
//! historical trading day in, counted backward from the as-of date? Each
//! priced row lands in exactly one column. The term-structure mask is the
//! same projection applied to the trading calendar with unit prices.

use contango_core::calendars::TradingDays;
use contango_core::schedule::last_before;
use contango_core::{ContangoError, Date};
use rust_decimal::Decimal;

use crate::boundaries::BucketBoundaries;
use crate::error::{CurveError, CurveResult};
use crate::matrix::{MaturityMatrix, MaturityRow, MATURITY_BUCKETS};
use crate::prices::PriceTable;

/// Projects `table` into a maturity matrix as of `tdate`.
///
/// Boundaries are the last [`MATURITY_BUCKETS`] entries of the ascending
/// `delivery_dates` strictly before `tdate`. Only rows in the window
/// `(earliest boundary, tdate]` with a usable price are kept.
///
/// Returns `None` ("no contribution") for an empty table or when no priced
/// row falls inside the window; an all-zero matrix is never produced.
pub fn project(delivery_dates: &[Date], table: &PriceTable, tdate: Date) -> Option<MaturityMatrix> {
    if table.is_empty() {
        return None;
    }

    let boundaries = BucketBoundaries::select(delivery_dates, tdate, MATURITY_BUCKETS);
    let matrix: MaturityMatrix = table
        .window(boundaries.earliest(), tdate)
        .filter_map(|(date, prices)| {
            let value = prices.value()?;
            let bucket = boundaries.bucket_of(date)?;
            Some((date, MaturityRow::single(bucket, value)?))
        })
        .collect();

    if matrix.is_empty() {
        tracing::debug!(%tdate, rows = table.len(), "no priced rows inside projection window");
        None
    } else {
        Some(matrix)
    }
}

/// Unit mask of the trading days in the projection window for `tdate`.
///
/// One row per trading day in `(earliest boundary, tdate]`, holding `1` in
/// the row's bucket.
pub fn term_structure_mask(
    delivery_dates: &[Date],
    trading_days: &TradingDays,
    tdate: Date,
) -> MaturityMatrix {
    let boundaries = BucketBoundaries::select(delivery_dates, tdate, MATURITY_BUCKETS);
    trading_days
        .between(boundaries.earliest(), tdate)
        .filter_map(|date| {
            let bucket = boundaries.bucket_of(date)?;
            Some((date, MaturityRow::single(bucket, Decimal::ONE)?))
        })
        .collect()
}

/// Shifts a mask back by one delivery cycle.
///
/// Column 0 is dropped and the remaining columns move one place toward the
/// front; rows left without any mark are removed. The trading days of the
/// cycle preceding the mask's first date, `(d[-2], d[-1]]` over the last two
/// delivery dates strictly before it, are prepended in the last column.
///
/// # Errors
///
/// Returns `CurveError::EmptyMatrix` for an empty mask, and a wrapped
/// `ContangoError::InsufficientDeliveryDates` when fewer than two delivery
/// dates precede the mask.
pub fn shift_mask(
    delivery_dates: &[Date],
    trading_days: &TradingDays,
    mask: &MaturityMatrix,
) -> CurveResult<MaturityMatrix> {
    let first = mask
        .first_date()
        .ok_or_else(|| CurveError::empty_matrix("cannot shift an empty mask"))?;

    let previous = last_before(delivery_dates, first, 2);
    let [lower, upper] = previous else {
        return Err(ContangoError::insufficient_delivery_dates(first, 2, previous.len()).into());
    };

    let mut shifted: MaturityMatrix = mask
        .rows()
        .map(|(date, row)| (date, row.shift_front()))
        .collect();
    shifted.retain(|_, row| !row.is_zero());

    if let Some(last_column) = MaturityRow::single(MATURITY_BUCKETS - 1, Decimal::ONE) {
        for date in trading_days.between(Some(*lower), *upper) {
            shifted.insert(date, last_column);
        }
    }

    tracing::debug!(
        from = %first,
        cycle_start = %lower,
        cycle_end = %upper,
        rows = shifted.len(),
        "mask shifted back one cycle"
    );
    Ok(shifted)
}
