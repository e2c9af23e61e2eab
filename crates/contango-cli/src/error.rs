//! CLI error types.

use contango_core::ContangoError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Schedule or calendar error.
    #[error(transparent)]
    Core(#[from] ContangoError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
