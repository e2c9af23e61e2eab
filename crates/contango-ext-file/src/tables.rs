//! Writers and readers for derived tables.
//!
//! | Table        | Header                                                        |
//! |--------------|---------------------------------------------------------------|
//! | Aggregate    | `Trade Date,0,1,…,11`                                         |
//! | Change       | `Trade Date,1,…,11` (missing changes are empty cells)         |
//! | Distribution | `Trade Date,<value>,max,min,percentile,max_date,min_date`     |

use std::path::Path;

use contango_analytics::{ChangeTable, DistributionSnapshot, CHANGE_COLUMNS};
use contango_curves::{MaturityMatrix, MaturityRow, MATURITY_BUCKETS};
use rust_decimal::Decimal;

use crate::error::{FileError, FileResult};
use crate::sheet::{parse_price, parse_trade_date, Sheet, TRADE_DATE};

/// Writes a maturity matrix, one row per date in ascending order.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_matrix(path: impl AsRef<Path>, matrix: &MaturityMatrix) -> FileResult<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![TRADE_DATE.to_string()];
    header.extend((0..MATURITY_BUCKETS).map(|bucket| bucket.to_string()));
    writer.write_record(&header)?;

    for (date, row) in matrix.rows() {
        let mut record = vec![date.to_string()];
        record.extend(row.cells().iter().map(Decimal::to_string));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = matrix.len(), "matrix written");
    Ok(())
}

/// Reads a matrix written by [`write_matrix`].
///
/// Blank cells read as zero.
///
/// # Errors
///
/// Returns `FileError::MissingColumn` if a bucket column is absent and
/// `FileError::Parse` for an unparsable date or cell.
pub fn read_matrix(path: impl AsRef<Path>) -> FileResult<MaturityMatrix> {
    let path = path.as_ref();
    let Some(sheet) = Sheet::read(path)? else {
        return Ok(MaturityMatrix::new());
    };

    let date_col = sheet.require(TRADE_DATE)?;
    let bucket_cols = (0..MATURITY_BUCKETS)
        .map(|bucket| sheet.require(&bucket.to_string()))
        .collect::<FileResult<Vec<_>>>()?;

    let mut matrix = MaturityMatrix::new();
    for (i, record) in sheet.rows().iter().enumerate() {
        let row_number = i + 1;
        let date = record
            .get(date_col)
            .and_then(parse_trade_date)
            .ok_or_else(|| FileError::parse(path, row_number, "unparsable trade date"))?;

        let mut cells = [Decimal::ZERO; MATURITY_BUCKETS];
        for (cell, col) in cells.iter_mut().zip(&bucket_cols) {
            let raw = record.get(*col).unwrap_or_default();
            if raw.is_empty() {
                continue;
            }
            *cell = parse_price(raw).ok_or_else(|| {
                FileError::parse(path, row_number, format!("unparsable cell '{raw}'"))
            })?;
        }
        matrix.insert(date, MaturityRow::new(cells));
    }
    Ok(matrix)
}

/// Writes a change table; missing changes are empty cells.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_change_table(path: impl AsRef<Path>, table: &ChangeTable) -> FileResult<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![TRADE_DATE.to_string()];
    header.extend((1..=CHANGE_COLUMNS).map(|column| column.to_string()));
    writer.write_record(&header)?;

    for (date, row) in table.rows() {
        let mut record = vec![date.to_string()];
        record.extend(
            row.cells()
                .iter()
                .map(|change| change.map(|c| c.normalize().to_string()).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = table.len(), "change table written");
    Ok(())
}

/// Writes a series with its distribution columns; `value_column` names the
/// series column.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_distribution(
    path: impl AsRef<Path>,
    value_column: &str,
    snapshots: &[DistributionSnapshot],
) -> FileResult<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        TRADE_DATE,
        value_column,
        "max",
        "min",
        "percentile",
        "max_date",
        "min_date",
    ])?;

    for snap in snapshots {
        writer.write_record([
            snap.date.to_string(),
            snap.value.to_string(),
            snap.max.to_string(),
            snap.min.to_string(),
            snap.percentile.to_string(),
            snap.max_date.to_string(),
            snap.min_date.to_string(),
        ])?;
    }
    writer.flush()?;

    tracing::debug!(path = %path.display(), rows = snapshots.len(), "distribution written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contango_analytics::{change_table, track, DistributionParams, PriceSeries};
    use contango_core::Date;
    use rust_decimal_macros::dec;
    use std::fs;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn sample() -> MaturityMatrix {
        let mut front = [Decimal::ZERO; MATURITY_BUCKETS];
        front[0] = dec!(25.10);
        front[1] = dec!(27.45);
        [
            (d("2020-09-09"), MaturityRow::new(front)),
            (d("2020-09-10"), MaturityRow::single(2, dec!(28.3)).unwrap()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_matrix_file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aggregate.csv");
        write_matrix(&path, &sample()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Trade Date,0,1,2,3,4,5,6,7,8,9,10,11"));
        assert_eq!(
            lines.next(),
            Some("2020-09-09,25.10,27.45,0,0,0,0,0,0,0,0,0,0")
        );
        assert_eq!(read_matrix(&path).unwrap(), sample());
    }

    #[test]
    fn test_read_matrix_requires_every_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aggregate.csv");
        fs::write(&path, "Trade Date,0,1\n2020-09-09,1,2\n").unwrap();
        assert!(matches!(
            read_matrix(&path),
            Err(FileError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_change_table_missing_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("change.csv");
        write_change_table(&path, &change_table(&sample())).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Trade Date,1,2,3,4,5,6,7,8,9,10,11");
        // (27.45 - 25.10) / 25.10, then 0 - 27.45 over 27.45, then zero divisors
        assert!(lines[1].starts_with("2020-09-09,0.0936"));
        assert!(lines[1].ends_with(",-1,,,,,,,,,"));
        assert_eq!(lines[2], "2020-09-10,,,-1,,,,,,,,");
    }

    #[test]
    fn test_distribution_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vix.csv");
        let series = PriceSeries::from_points(vec![
            (d("2020-09-14"), dec!(25.85)),
            (d("2020-09-15"), dec!(25.59)),
        ])
        .unwrap();
        let snaps = track(&series, &DistributionParams::default()).unwrap();
        write_distribution(&path, "VIX Close", &snaps).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Trade Date,VIX Close,max,min,percentile,max_date,min_date");
        assert_eq!(lines[2], "2020-09-15,25.59,25.85,25.59,50,2020-09-14,2020-09-15");
    }
}
