//! Domain types for futures term structure analytics.
//!
//! - [`Date`]: Calendar date used for trade dates and delivery dates

mod date;

pub use date::Date;
