//! # Contango Core
//!
//! Core types and calendars for the Contango futures term structure library.
//!
//! This crate provides the foundational building blocks used throughout Contango:
//!
//! - **Types**: [`Date`] for trade dates and delivery dates
//! - **Trading Calendars**: exchange calendars as explicit values, never globals
//! - **Delivery Schedules**: the ascending delivery-date list of a futures chain
//!
//! ## Example
//!
//! ```rust
//! use contango_core::prelude::*;
//!
//! let params = ScheduleParams::new(
//!     Date::from_ymd(2013, 1, 1).unwrap(),
//!     Date::from_ymd(2013, 4, 1).unwrap(),
//! );
//! let schedule = DeliverySchedule::generate(&params, &CmeCalendar::new()).unwrap();
//! assert_eq!(schedule.delivery_dates()[0].to_string(), "2013-01-16");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod calendars;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{CmeCalendar, TradingCalendar, TradingDays, WeekendCalendar};
    pub use crate::error::{ContangoError, ContangoResult};
    pub use crate::schedule::{DeliverySchedule, ScheduleParams};
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{ContangoError, ContangoResult};
pub use types::Date;
