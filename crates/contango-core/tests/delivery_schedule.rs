//! Integration tests for delivery schedule generation on the CME calendar.
//!
//! Reference sequences were produced by the production pipeline for monthly
//! volatility futures starting 2013-01-01.

use contango_core::calendars::{CmeCalendar, TradingCalendar, WeekendCalendar};
use contango_core::schedule::{DeliverySchedule, ScheduleParams};
use contango_core::Date;
use proptest::prelude::*;

fn d(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn cme_schedule() -> DeliverySchedule {
    let params = ScheduleParams::new(d("2013-01-01"), d("2021-02-24"));
    DeliverySchedule::generate(&params, &CmeCalendar::new()).unwrap()
}

// ============================================================================
// Reference sequences
// ============================================================================

#[test]
fn test_first_year_of_deliveries() {
    let schedule = cme_schedule();
    let expected = [
        "2013-01-16",
        "2013-02-13",
        "2013-03-20",
        "2013-04-17",
        "2013-05-22",
        "2013-06-19",
        "2013-07-17",
        "2013-08-21",
        "2013-09-18",
        "2013-10-16",
        "2013-11-20",
        "2013-12-18",
    ];
    let actual: Vec<String> = schedule.delivery_dates()[..12]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_2019_2020_deliveries() {
    let schedule = cme_schedule();
    let expected = [
        "2019-08-21",
        "2019-09-18",
        "2019-10-16",
        "2019-11-20",
        "2019-12-18",
        "2020-01-22",
        "2020-02-19",
        "2020-03-18",
        "2020-04-15",
        "2020-05-20",
        "2020-06-17",
        "2020-07-22",
        "2020-08-19",
        "2020-09-16",
        "2020-10-21",
        "2020-11-18",
        "2020-12-16",
    ];
    let actual: Vec<String> = schedule.delivery_dates()[79..=95]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(actual, expected);
    assert_eq!(schedule.delivery_dates().len(), 97);
    assert_eq!(schedule.delivery_dates().last(), Some(&d("2021-01-20")));
}

#[test]
fn test_before_selects_trailing_boundaries() {
    let schedule = cme_schedule();
    let boundaries = schedule.before(d("2020-09-10"), 12);
    assert_eq!(boundaries.len(), 12);
    assert_eq!(boundaries.first(), Some(&d("2019-09-18")));
    assert_eq!(boundaries.last(), Some(&d("2020-08-19")));

    // a delivery date is never its own boundary
    let on_delivery = schedule.before(d("2020-09-16"), 12);
    assert_eq!(on_delivery.last(), Some(&d("2020-08-19")));
    let after_delivery = schedule.before(d("2020-09-17"), 12);
    assert_eq!(after_delivery.first(), Some(&d("2019-10-16")));
    assert_eq!(after_delivery.last(), Some(&d("2020-09-16")));
}

// ============================================================================
// Structural properties
// ============================================================================

#[test]
fn test_trading_days_cover_schedule() {
    let schedule = cme_schedule();
    let days = schedule.trading_days();
    assert_eq!(days.first(), Some(d("2013-01-02")));
    assert!(!days.contains(d("2020-04-10")));
    assert!(days.contains(d("2020-04-09")));
}

proptest! {
    #[test]
    fn prop_schedule_is_strictly_ascending_and_offset(offset in 0i64..2000, span in 60i64..800) {
        let start = d("2010-01-01").add_days(offset);
        let params = ScheduleParams::new(start, start.add_days(span));
        let calendar = CmeCalendar::new();
        let schedule = DeliverySchedule::generate(&params, &calendar).unwrap();
        let dates = schedule.delivery_dates();

        for pair in dates.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for date in dates {
            let expiration = date.add_days(ScheduleParams::DEFAULT_ROLL_OFFSET_DAYS);
            prop_assert!(calendar.is_trading_day(expiration));
            // third Friday falls on the 15th..21st, holidays only move it back a day
            prop_assert!((14..=21).contains(&expiration.day()));
        }
    }

    #[test]
    fn prop_cme_never_later_than_weekend_only(offset in 0i64..2000) {
        let start = d("2010-01-01").add_days(offset);
        let params = ScheduleParams::new(start, start.add_days(400));
        let cme = DeliverySchedule::generate(&params, &CmeCalendar::new()).unwrap();
        let plain = DeliverySchedule::generate(&params, &WeekendCalendar).unwrap();
        prop_assert_eq!(cme.delivery_dates().len(), plain.delivery_dates().len());
        for (a, b) in cme.delivery_dates().iter().zip(plain.delivery_dates()) {
            prop_assert!(a <= b);
        }
    }
}
