//! Error types for maturity matrix operations.

use contango_core::ContangoError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurveError {
    /// No snapshot produced a contribution during a combine pass.
    #[error("No usable snapshots: {considered} considered, none contributed")]
    NoUsableSnapshots {
        /// Number of snapshots offered to the combiner.
        considered: usize,
    },

    /// Operation needs at least one row.
    #[error("Empty matrix: {reason}")]
    EmptyMatrix {
        /// Description of the operation that failed.
        reason: String,
    },

    /// Error from the core crate.
    #[error(transparent)]
    Core(#[from] ContangoError),
}

impl CurveError {
    /// Creates a no usable snapshots error.
    #[must_use]
    pub fn no_usable_snapshots(considered: usize) -> Self {
        Self::NoUsableSnapshots { considered }
    }

    /// Creates an empty matrix error.
    #[must_use]
    pub fn empty_matrix(reason: impl Into<String>) -> Self {
        Self::EmptyMatrix {
            reason: reason.into(),
        }
    }
}
