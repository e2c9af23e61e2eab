//! Error types for file operations.

use std::path::Path;

use contango_analytics::AnalyticsError;
use contango_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised at the delimited-file boundary.
#[derive(Debug, Error)]
pub enum FileError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader or writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header.
    #[error("{path}: missing column '{column}'")]
    MissingColumn {
        /// File being read.
        path: String,
        /// Column name.
        column: String,
    },

    /// A cell could not be parsed.
    #[error("{path}: row {row}: {message}")]
    Parse {
        /// File being read.
        path: String,
        /// 1-based record number.
        row: usize,
        /// Description of the failure.
        message: String,
    },

    /// A combine pass found nothing to combine.
    #[error("no usable snapshots in {dir} ({considered} considered)")]
    NoUsableSnapshots {
        /// Snapshot directory.
        dir: String,
        /// Number of snapshot files read.
        considered: usize,
    },

    /// Error from the curves crate.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Error from the analytics crate.
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}

impl FileError {
    /// Creates a missing column error.
    #[must_use]
    pub fn missing_column(path: &Path, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            path: path.display().to_string(),
            column: column.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(path: &Path, row: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            row,
            message: message.into(),
        }
    }
}
