//! Error types for the Contango library.
//!
//! This module defines the error types shared by the core crates,
//! providing structured error handling with context.

use thiserror::Error;

/// A specialized Result type for Contango operations.
pub type ContangoResult<T> = Result<T, ContangoError>;

/// The main error type for core Contango operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContangoError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Delivery schedule could not be generated.
    #[error("Schedule error: {reason}")]
    ScheduleError {
        /// Description of the error.
        reason: String,
    },

    /// Not enough delivery dates precede the requested date.
    #[error("Need at least {required} delivery dates before {date}, found {found}")]
    InsufficientDeliveryDates {
        /// Date the delivery dates must precede.
        date: String,
        /// Minimum number required.
        required: usize,
        /// Number actually available.
        found: usize,
    },
}

impl ContangoError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a schedule error.
    #[must_use]
    pub fn schedule_error(reason: impl Into<String>) -> Self {
        Self::ScheduleError {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient delivery dates error.
    #[must_use]
    pub fn insufficient_delivery_dates(date: impl ToString, required: usize, found: usize) -> Self {
        Self::InsufficientDeliveryDates {
            date: date.to_string(),
            required,
            found,
        }
    }
}
