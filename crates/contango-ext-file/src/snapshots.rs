//! Snapshot directories.
//!
//! A snapshot directory holds one price file per contract, each named after
//! its nominal date (`YYYY-MM-DD.csv`). Names that do not follow the pattern
//! are ignored.

use std::fs;
use std::path::{Path, PathBuf};

use contango_core::Date;
use contango_curves::{AggregateMatrix, CombineParams, Combiner, CurveError};

use crate::error::{FileError, FileResult};
use crate::prices::read_price_table;
use crate::sheet::{parse_trade_date, Sheet, TRADE_DATE};

const SNAPSHOT_EXTENSION: &str = "csv";

/// A price file and the date encoded in its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotFile {
    /// Nominal date from the file name.
    pub date: Date,
    /// Full path.
    pub path: PathBuf,
}

/// Path of the snapshot for `date` in `dir`.
pub fn snapshot_path(dir: impl AsRef<Path>, date: Date) -> PathBuf {
    dir.as_ref().join(format!("{date}.{SNAPSHOT_EXTENSION}"))
}

/// Date encoded in a snapshot file name, `None` if the name does not match
/// `YYYY-MM-DD.csv`.
pub fn parse_snapshot_name(name: &str) -> Option<Date> {
    let stem = name.strip_suffix(".csv")?;
    let date = Date::parse(stem).ok()?;
    (date.to_string() == stem).then_some(date)
}

/// Snapshot files in `dir`, newest first.
///
/// # Errors
///
/// Returns `FileError::Io` if the directory cannot be listed.
pub fn discover_snapshots(dir: impl AsRef<Path>) -> FileResult<Vec<SnapshotFile>> {
    let dir = dir.as_ref();
    let mut snapshots = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        match parse_snapshot_name(name) {
            Some(date) => snapshots.push(SnapshotFile {
                date,
                path: entry.path(),
            }),
            None if name.ends_with(".csv") => {
                tracing::warn!(dir = %dir.display(), name, "skipping unparsable snapshot name");
            }
            None => tracing::debug!(name, "ignoring non-snapshot file"),
        }
    }
    snapshots.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(snapshots)
}

/// Returns true if the file at `path` is non-empty and its last row is dated
/// `date`, i.e. the day's settlement has been published.
///
/// # Errors
///
/// Returns an error if the file cannot be read or lacks a `Trade Date` column.
pub fn snapshot_is_complete(path: impl AsRef<Path>, date: Date) -> FileResult<bool> {
    let Some(sheet) = Sheet::read(path.as_ref())? else {
        return Ok(false);
    };
    let date_col = sheet.require(TRADE_DATE)?;
    let last = sheet
        .rows()
        .last()
        .and_then(|record| record.get(date_col))
        .and_then(parse_trade_date);
    Ok(last == Some(date))
}

/// Combines the newest snapshots in `dir`.
///
/// Files are read lazily, newest first, each projected at its own nominal
/// date, until `params.max_times` of them have contributed. Unreadable files
/// contribute nothing.
///
/// # Errors
///
/// Returns `FileError::NoUsableSnapshots` if no file contributed, or
/// `FileError::Io` if the directory cannot be listed.
pub fn combine_directory(
    delivery_dates: &[Date],
    dir: impl AsRef<Path>,
    params: &CombineParams,
) -> FileResult<AggregateMatrix> {
    let dir = dir.as_ref();
    let snapshots = discover_snapshots(dir)?;
    tracing::debug!(dir = %dir.display(), found = snapshots.len(), "snapshots discovered");

    let mut combiner = Combiner::new(delivery_dates, *params);
    for snapshot in &snapshots {
        if combiner.is_full() {
            break;
        }
        match read_price_table(&snapshot.path) {
            Ok(table) => {
                combiner.offer(snapshot.date, &table);
            }
            Err(err) => {
                tracing::warn!(path = %snapshot.path.display(), error = %err, "skipping unreadable snapshot");
            }
        }
    }

    combiner.finish().map_err(|err| match err {
        CurveError::NoUsableSnapshots { considered } => FileError::NoUsableSnapshots {
            dir: dir.display().to_string(),
            considered,
        },
        other => FileError::Curve(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_parse_snapshot_name() {
        assert_eq!(parse_snapshot_name("2020-09-16.csv"), Some(d("2020-09-16")));
        assert_eq!(parse_snapshot_name("2020-9-16.csv"), None);
        assert_eq!(parse_snapshot_name("2020-09-16.txt"), None);
        assert_eq!(parse_snapshot_name("VIX.csv"), None);
        assert_eq!(parse_snapshot_name("2020-13-01.csv"), None);
        assert_eq!(parse_snapshot_name(" 2020-9-16.csv"), None);
        assert_eq!(parse_snapshot_name("2020-09-16 .csv"), None);
        assert_eq!(parse_snapshot_name("2020-9-6.csv"), None);
        assert_eq!(parse_snapshot_name("+2020-09-16.csv"), None);
    }

    #[test]
    fn test_discover_sorts_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2020-08-19.csv", "2020-10-21.csv", "2020-09-16.csv", "notes.csv", "README"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("2020-11-18.csv")).unwrap();

        let dates: Vec<Date> = discover_snapshots(dir.path())
            .unwrap()
            .into_iter()
            .map(|s| s.date)
            .collect();
        assert_eq!(dates, vec![d("2020-10-21"), d("2020-09-16"), d("2020-08-19")]);
    }

    #[test]
    fn test_snapshot_completeness() {
        let dir = tempfile::tempdir().unwrap();
        let date = d("2020-09-16");
        let path = snapshot_path(dir.path(), date);
        assert!(path.ends_with("2020-09-16.csv"));

        fs::write(&path, "Trade Date,Settle\n2020-09-15,27.0\n2020-09-16,27.4\n").unwrap();
        assert!(snapshot_is_complete(&path, date).unwrap());

        fs::write(&path, "Trade Date,Settle\n2020-09-14,27.0\n2020-09-15,27.4\n").unwrap();
        assert!(!snapshot_is_complete(&path, date).unwrap());

        fs::write(&path, "").unwrap();
        assert!(!snapshot_is_complete(&path, date).unwrap());
    }
}
