//! Error types for the analytics crate.

use thiserror::Error;

/// A specialized Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Error type for analytics operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Trailing window must hold at least one observation.
    #[error("invalid distribution window: {window}")]
    InvalidWindow {
        /// Requested window length.
        window: usize,
    },

    /// A price series has two observations for one date.
    #[error("duplicate observation for {date}")]
    DuplicateDate {
        /// The repeated date.
        date: String,
    },
}

impl AnalyticsError {
    /// Creates an invalid window error.
    #[must_use]
    pub fn invalid_window(window: usize) -> Self {
        Self::InvalidWindow { window }
    }

    /// Creates a duplicate date error.
    #[must_use]
    pub fn duplicate_date(date: impl ToString) -> Self {
        Self::DuplicateDate {
            date: date.to_string(),
        }
    }
}
