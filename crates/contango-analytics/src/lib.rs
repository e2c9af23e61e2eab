//! # Contango Analytics
//!
//! Derived analytics over term structures and price series:
//!
//! - **Changes**: fractional change between adjacent maturity buckets of an
//!   aggregate matrix ([`change_table`])
//! - **Distribution**: running extremes and trailing-window percentile rank of
//!   a price series ([`track`])
//! - **Intraday**: flags live quotes whose high or low moved beyond a threshold
//!   from the previous settlement ([`intraday_warnings`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod change;
pub mod distribution;
pub mod error;
pub mod intraday;

pub use change::{change_table, ChangeRow, ChangeTable, CHANGE_COLUMNS};
pub use distribution::{
    percentile_boundaries, percentile_rank, running_extremes, track, DistributionParams,
    DistributionSnapshot, PriceSeries, NEUTRAL_PERCENTILE,
};
pub use error::{AnalyticsError, AnalyticsResult};
pub use intraday::{
    classify_quote, intraday_warnings, same_warnings, IntradayParams, IntradayQuote,
    IntradayState, IntradayWarning,
};
