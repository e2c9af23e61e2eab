//! Readers for exchange price files.
//!
//! ## Columns (case-insensitive, order-independent, extra columns ignored)
//!
//! | Column       | Example      | Notes                            |
//! |--------------|--------------|----------------------------------|
//! | `Trade Date` | `2020-09-16` | `MM/DD/YYYY` also accepted       |
//! | `Settle`     | `27.45`      | Blank or non-numeric is absent   |
//! | `Close`      | `27.50`      | Blank or non-numeric is absent   |
//!
//! Rows whose trade date does not parse are skipped.

use std::path::Path;

use contango_analytics::PriceSeries;
use contango_curves::{PriceRow, PriceTable};

use crate::error::{FileError, FileResult};
use crate::sheet::{parse_price, parse_trade_date, Sheet, TRADE_DATE};

/// Settlement price column.
pub const SETTLE: &str = "Settle";

/// Close price column.
pub const CLOSE: &str = "Close";

/// Reads a contract snapshot into a price table.
///
/// An empty file gives an empty table.
///
/// # Errors
///
/// Returns `FileError::MissingColumn` if the header lacks `Trade Date` or has
/// neither `Settle` nor `Close`.
pub fn read_price_table(path: impl AsRef<Path>) -> FileResult<PriceTable> {
    let path = path.as_ref();
    let Some(sheet) = Sheet::read(path)? else {
        return Ok(PriceTable::new());
    };

    let date_col = sheet.require(TRADE_DATE)?;
    let settle_col = sheet.column(SETTLE);
    let close_col = sheet.column(CLOSE);
    if settle_col.is_none() && close_col.is_none() {
        return Err(FileError::missing_column(path, SETTLE));
    }

    let mut table = PriceTable::new();
    let mut skipped = 0usize;
    for record in sheet.rows() {
        let Some(date) = record.get(date_col).and_then(parse_trade_date) else {
            skipped += 1;
            continue;
        };
        let cell = |col: Option<usize>| col.and_then(|i| record.get(i)).and_then(parse_price);
        table.insert(date, PriceRow::new(cell(settle_col), cell(close_col)));
    }

    tracing::debug!(path = %path.display(), rows = table.len(), skipped, "price table read");
    Ok(table)
}

/// Reads a dated numeric series from `column`, such as the index level in a
/// spot index history file.
///
/// Rows with a blank or non-numeric value are skipped.
///
/// # Errors
///
/// Returns `FileError::MissingColumn` for an absent column and
/// `FileError::Analytics` if a trade date repeats.
pub fn read_price_series(path: impl AsRef<Path>, column: &str) -> FileResult<PriceSeries> {
    let path = path.as_ref();
    let Some(sheet) = Sheet::read(path)? else {
        return Ok(PriceSeries::default());
    };

    let date_col = sheet.require(TRADE_DATE)?;
    let value_col = sheet.require(column)?;
    let points: Vec<_> = sheet
        .rows()
        .iter()
        .filter_map(|record| {
            let date = record.get(date_col).and_then(parse_trade_date)?;
            let value = record.get(value_col).and_then(parse_price)?;
            Some((date, value))
        })
        .collect();

    tracing::debug!(
        path = %sheet.path().display(),
        column,
        points = points.len(),
        "price series read"
    );
    Ok(PriceSeries::from_points(points)?)
}
