//! Header-located view over a delimited file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use contango_core::Date;
use csv::StringRecord;
use rust_decimal::Decimal;

use crate::error::{FileError, FileResult};

/// Date column of every file this crate reads or writes.
pub const TRADE_DATE: &str = "Trade Date";

/// Trade dates in older exchange files.
const US_DATE_FORMAT: &str = "%m/%d/%Y";

/// Records below the header row of a delimited file.
///
/// Exchange downloads sometimes carry disclaimer lines above the header, so
/// the header is the first record holding a `Trade Date` cell. Column lookup
/// ignores case.
pub(crate) struct Sheet {
    path: PathBuf,
    columns: HashMap<String, usize>,
    rows: Vec<StringRecord>,
}

impl Sheet {
    /// Reads `path`; `None` for a file without any records.
    pub(crate) fn read(path: &Path) -> FileResult<Option<Self>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        let records = reader.records().collect::<Result<Vec<_>, _>>()?;
        if records.is_empty() {
            return Ok(None);
        }

        let header_at = records
            .iter()
            .position(|record| record.iter().any(|f| f.eq_ignore_ascii_case(TRADE_DATE)))
            .ok_or_else(|| FileError::missing_column(path, TRADE_DATE))?;
        if header_at > 0 {
            tracing::debug!(path = %path.display(), skipped = header_at, "lines above header");
        }

        let mut rows = records;
        let header = rows.remove(header_at);
        rows.drain(..header_at);
        let columns = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_ascii_lowercase(), i))
            .collect();

        Ok(Some(Self {
            path: path.to_path_buf(),
            columns,
            rows,
        }))
    }

    /// Position of `name`, ignoring case.
    pub(crate) fn column(&self, name: &str) -> Option<usize> {
        self.columns.get(&name.to_ascii_lowercase()).copied()
    }

    /// Position of `name`, or `FileError::MissingColumn`.
    pub(crate) fn require(&self, name: &str) -> FileResult<usize> {
        self.column(name)
            .ok_or_else(|| FileError::missing_column(&self.path, name))
    }

    /// Data records in file order.
    pub(crate) fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses `YYYY-MM-DD`, falling back to `MM/DD/YYYY`.
pub(crate) fn parse_trade_date(cell: &str) -> Option<Date> {
    Date::parse(cell).ok().or_else(|| {
        NaiveDate::parse_from_str(cell.trim(), US_DATE_FORMAT)
            .ok()
            .map(Date::from)
    })
}

/// Parses a price cell; blank or non-numeric cells are absent.
pub(crate) fn parse_price(cell: &str) -> Option<Decimal> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .ok()
}
