//! Bucket boundaries for a given as-of date.

use contango_core::schedule::last_before;
use contango_core::Date;

use crate::matrix::MATURITY_BUCKETS;

/// Delivery dates partitioning the history before an as-of date into buckets.
///
/// With boundaries `b[0] < … < b[k-1]` and as-of date `t`, column 0 covers
/// `(b[k-1], t]`, column 1 covers `(b[k-2], b[k-1]]` and so on down to column
/// `k-1` covering `(b[0], b[1]]`. Dates on or before `b[0]` lie outside the
/// window. With no boundaries at all, a single bucket covers every date up to
/// `t`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketBoundaries {
    dates: Vec<Date>,
    tdate: Date,
}

impl BucketBoundaries {
    /// Selects the last `times` delivery dates strictly before `tdate`.
    ///
    /// `times` is capped at [`MATURITY_BUCKETS`]; `delivery_dates` must be
    /// ascending.
    pub fn select(delivery_dates: &[Date], tdate: Date, times: usize) -> Self {
        Self {
            dates: last_before(delivery_dates, tdate, times.min(MATURITY_BUCKETS)).to_vec(),
            tdate,
        }
    }

    /// Selected delivery dates, ascending.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// As-of date closing column 0.
    pub fn tdate(&self) -> Date {
        self.tdate
    }

    /// Earliest boundary, `None` when the lower end is unbounded.
    pub fn earliest(&self) -> Option<Date> {
        self.dates.first().copied()
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.dates.len().max(1)
    }

    /// Returns true if `date` lies in `(earliest, tdate]`.
    pub fn window_contains(&self, date: Date) -> bool {
        date <= self.tdate && self.earliest().map_or(true, |lower| date > lower)
    }

    /// Column for `date`, or `None` outside the window.
    pub fn bucket_of(&self, date: Date) -> Option<usize> {
        if !self.window_contains(date) {
            return None;
        }
        if self.dates.is_empty() {
            return Some(0);
        }
        let below = self.dates.partition_point(|boundary| *boundary < date);
        Some(self.dates.len() - below)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn deliveries() -> Vec<Date> {
        [
            "2020-05-20",
            "2020-06-17",
            "2020-07-22",
            "2020-08-19",
            "2020-09-16",
            "2020-10-21",
        ]
        .iter()
        .map(|s| d(s))
        .collect()
    }

    #[test]
    fn test_select_is_strictly_before() {
        let b = BucketBoundaries::select(&deliveries(), d("2020-09-16"), 12);
        assert_eq!(b.dates().len(), 4);
        assert_eq!(b.dates().last(), Some(&d("2020-08-19")));
        assert_eq!(b.bucket_count(), 4);
    }

    #[test]
    fn test_bucket_edges() {
        let b = BucketBoundaries::select(&deliveries(), d("2020-09-10"), 12);
        assert_eq!(b.bucket_of(d("2020-09-10")), Some(0));
        assert_eq!(b.bucket_of(d("2020-08-20")), Some(0));
        assert_eq!(b.bucket_of(d("2020-08-19")), Some(1));
        assert_eq!(b.bucket_of(d("2020-07-23")), Some(1));
        assert_eq!(b.bucket_of(d("2020-07-22")), Some(2));
        assert_eq!(b.bucket_of(d("2020-05-21")), Some(3));
        assert_eq!(b.bucket_of(d("2020-05-20")), None);
        assert_eq!(b.bucket_of(d("2020-09-11")), None);
    }

    #[test]
    fn test_delivery_day_belongs_to_front_bucket_until_passed() {
        let on = BucketBoundaries::select(&deliveries(), d("2020-09-16"), 12);
        assert_eq!(on.bucket_of(d("2020-09-16")), Some(0));
        let after = BucketBoundaries::select(&deliveries(), d("2020-09-17"), 12);
        assert_eq!(after.bucket_of(d("2020-09-17")), Some(0));
        assert_eq!(after.bucket_of(d("2020-09-16")), Some(1));
    }

    #[test]
    fn test_times_limits_window() {
        let b = BucketBoundaries::select(&deliveries(), d("2020-09-10"), 2);
        assert_eq!(b.earliest(), Some(d("2020-07-22")));
        assert!(!b.window_contains(d("2020-07-22")));
        assert!(b.window_contains(d("2020-07-23")));
    }

    #[test]
    fn test_synthetic_boundary_covers_all_history() {
        let b = BucketBoundaries::select(&deliveries(), d("2020-05-01"), 12);
        assert!(b.dates().is_empty());
        assert_eq!(b.earliest(), None);
        assert_eq!(b.bucket_count(), 1);
        assert_eq!(b.bucket_of(d("1999-01-04")), Some(0));
        assert_eq!(b.bucket_of(d("2020-05-01")), Some(0));
        assert_eq!(b.bucket_of(d("2020-05-02")), None);
    }
}
