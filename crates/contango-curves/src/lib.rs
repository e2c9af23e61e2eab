//! # Contango Curves
//!
//! Maturity matrices for the Contango futures term structure library.
//!
//! This crate provides:
//!
//! - **Matrices**: [`MaturityMatrix`], a date-ordered table of fixed
//!   [`MATURITY_BUCKETS`]-column rows, and its zero-filled sum
//!   [`AggregateMatrix`]
//! - **Projection**: placing one contract's prices into the column of the
//!   delivery cycle each trading day belonged to
//! - **Masks**: the same bucketing applied to a trading calendar
//! - **Combination**: folding the newest snapshots into one aggregate
//!
//! ## Quick Start
//!
//! ```rust
//! use contango_curves::prelude::*;
//! use contango_core::Date;
//! use rust_decimal::Decimal;
//!
//! let deliveries = vec![
//!     Date::from_ymd(2020, 7, 22).unwrap(),
//!     Date::from_ymd(2020, 8, 19).unwrap(),
//! ];
//! let tdate = Date::from_ymd(2020, 9, 10).unwrap();
//! let table: PriceTable = [(tdate, PriceRow::new(Some(Decimal::new(2830, 2)), None))]
//!     .into_iter()
//!     .collect();
//!
//! let aggregate = combine_snapshots(&deliveries, [(tdate, table)], &CombineParams::default()).unwrap();
//! assert_eq!(aggregate.active_bucket(tdate), Some(0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod boundaries;
pub mod combine;
pub mod error;
pub mod matrix;
pub mod prices;
pub mod projection;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::boundaries::BucketBoundaries;
    pub use crate::combine::{combine_snapshots, CombineParams, Combiner};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::matrix::{AggregateMatrix, MaturityMatrix, MaturityRow, MATURITY_BUCKETS};
    pub use crate::prices::{PriceRow, PriceTable};
    pub use crate::projection::{project, shift_mask, term_structure_mask};
}

pub use boundaries::BucketBoundaries;
pub use combine::{combine_snapshots, CombineParams, Combiner};
pub use error::{CurveError, CurveResult};
pub use matrix::{AggregateMatrix, MaturityMatrix, MaturityRow, MATURITY_BUCKETS};
pub use prices::{PriceRow, PriceTable};
pub use projection::{project, shift_mask, term_structure_mask};
