//! Contract tickers and settlement-day resolution.

use chrono::{NaiveDateTime, Timelike};

use crate::types::Date;

/// Futures month codes, January through December.
pub const MONTH_CODES: [char; 12] = ['F', 'G', 'H', 'J', 'K', 'M', 'N', 'Q', 'U', 'V', 'X', 'Z'];

/// Number of monthly contracts listed after the front month.
const CHAIN_MONTHS_AHEAD: i32 = 12;

/// Month code for a 1-based month, `None` outside `1..=12`.
pub fn month_code(month: u32) -> Option<char> {
    MONTH_CODES.get(month.checked_sub(1)? as usize).copied()
}

/// Tickers for the contract month of `date` and the following twelve months.
///
/// Tickers are formatted `{root}{month code}{yy}.{exchange}`, so gold on COMEX
/// in September 2020 starts with `GCU20.CMX` and ends with `GCU21.CMX`.
pub fn futures_chain(root: &str, exchange: &str, date: Date) -> Vec<String> {
    (0..=CHAIN_MONTHS_AHEAD)
        .filter_map(|offset| {
            let total = date.year() * 12 + date.month() as i32 - 1 + offset;
            let year = total.div_euclid(12);
            let code = month_code((total.rem_euclid(12) + 1) as u32)?;
            Some(format!("{root}{code}{:02}.{exchange}", year.rem_euclid(100)))
        })
        .collect()
}

/// Trade date a run at local time `now` should report.
///
/// Settlement data for a day is published in the evening; before
/// `cutoff_hour` the latest complete day is the previous calendar day.
pub fn settlement_day(now: NaiveDateTime, cutoff_hour: u32) -> Date {
    let today = Date::from(now.date());
    if now.hour() < cutoff_hour {
        today.add_days(-1)
    } else {
        today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_month_code() {
        assert_eq!(month_code(1), Some('F'));
        assert_eq!(month_code(9), Some('U'));
        assert_eq!(month_code(12), Some('Z'));
        assert_eq!(month_code(0), None);
        assert_eq!(month_code(13), None);
    }

    #[test]
    fn test_gold_chain() {
        let chain = futures_chain("GC", "CMX", d("2020-09-16"));
        assert_eq!(chain.len(), 13);
        assert_eq!(chain.first().map(String::as_str), Some("GCU20.CMX"));
        assert_eq!(chain.last().map(String::as_str), Some("GCU21.CMX"));
        for ticker in ["GCZ20.CMX", "GCX20.CMX", "GCU20.CMX", "GCU21.CMX"] {
            assert!(chain.iter().any(|t| t == ticker), "missing {ticker}");
        }
    }

    #[test]
    fn test_crude_chain_crosses_year() {
        let chain = futures_chain("CL", "NYM", d("2020-12-16"));
        for ticker in ["CLZ20.NYM", "CLZ21.NYM", "CLX21.NYM", "CLF21.NYM"] {
            assert!(chain.iter().any(|t| t == ticker), "missing {ticker}");
        }
    }

    #[test]
    fn test_settlement_day_cutoff() {
        let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
        assert_eq!(settlement_day(at("2020-12-02 00:00"), 23), d("2020-12-01"));
        assert_eq!(settlement_day(at("2020-12-02 22:59"), 23), d("2020-12-01"));
        assert_eq!(settlement_day(at("2020-12-02 23:00"), 23), d("2020-12-02"));
    }
}
