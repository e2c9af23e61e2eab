//! Historical distribution of a price series.
//!
//! Each row of a chronological series gets the running maximum and minimum of
//! every value up to and including it, and the percentile position of its
//! value within the trailing window.
//!
//! # Percentile buckets
//!
//! The sorted window of `n` values is cut into 100 near-equal buckets; when
//! `n` is not a multiple of 100 the extra values go to the lowest buckets
//! first. The 99 inner cut points are the largest value of each of the first
//! 99 buckets, and the rank of a value is the number of cut points it strictly
//! exceeds. With fewer than a full window of history the rank is the neutral
//! [`NEUTRAL_PERCENTILE`].

use contango_core::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Number of percentile buckets.
pub const PERCENTILE_BUCKETS: usize = 100;

/// Rank reported until the trailing window is full.
pub const NEUTRAL_PERCENTILE: u8 = 50;

/// Highest rank.
pub const MAX_PERCENTILE: u8 = 99;

/// Parameters for [`track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionParams {
    /// Trailing window length in observations.
    pub window: usize,
}

impl DistributionParams {
    /// About three years of trading days.
    pub const DEFAULT_WINDOW: usize = 780;

    /// Parameters with the given window.
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl Default for DistributionParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

/// Chronological series of dated values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<(Date, Decimal)>,
}

impl PriceSeries {
    /// Builds a series, ordering the points by date.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::DuplicateDate` if a date appears twice.
    pub fn from_points(mut points: Vec<(Date, Decimal)>) -> AnalyticsResult<Self> {
        points.sort_by_key(|(date, _)| *date);
        if let Some(pair) = points.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(AnalyticsError::duplicate_date(pair[0].0));
        }
        Ok(Self { points })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observations in date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, Decimal)> + '_ {
        self.points.iter().copied()
    }

    /// Values in date order.
    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|(_, value)| *value).collect()
    }
}

/// Distribution statistics attached to one row of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSnapshot {
    /// Row date.
    pub date: Date,
    /// Row value.
    pub value: Decimal,
    /// Maximum up to and including this row.
    pub max: Decimal,
    /// Minimum up to and including this row.
    pub min: Decimal,
    /// Latest date at which `max` was reached.
    pub max_date: Date,
    /// Latest date at which `min` was reached.
    pub min_date: Date,
    /// Percentile rank within the trailing window, `0..=99`.
    pub percentile: u8,
}

/// Running maximum and minimum of `values`, inclusive of each row.
pub fn running_extremes(values: &[Decimal]) -> (Vec<Decimal>, Vec<Decimal>) {
    let mut maxes = Vec::with_capacity(values.len());
    let mut mins = Vec::with_capacity(values.len());
    let mut extremes: Option<(Decimal, Decimal)> = None;
    for &value in values {
        let (max, min) = match extremes {
            Some((max, min)) => (max.max(value), min.min(value)),
            None => (value, value),
        };
        maxes.push(max);
        mins.push(min);
        extremes = Some((max, min));
    }
    (maxes, mins)
}

/// Cumulative sizes of the first 99 of 100 buckets over `n` sorted values.
///
/// Bucket `i` holds `n / 100` values plus one more when `i < n % 100`.
pub fn percentile_boundaries(n: usize) -> Vec<usize> {
    let base = n / PERCENTILE_BUCKETS;
    let remainder = n % PERCENTILE_BUCKETS;
    (0..PERCENTILE_BUCKETS - 1)
        .scan(0, |cumulative, bucket| {
            *cumulative += base + usize::from(bucket < remainder);
            Some(*cumulative)
        })
        .collect()
}

/// Percentile rank of `value` within the ascending `sorted` window.
///
/// Returns `None` for an empty window.
pub fn rank_in_sorted(sorted: &[Decimal], value: Decimal) -> Option<u8> {
    if sorted.is_empty() {
        return None;
    }
    let exceeded = percentile_boundaries(sorted.len())
        .into_iter()
        .filter_map(|size| sorted.get(size.checked_sub(1)?))
        .filter(|cut| value > **cut)
        .count();
    Some(u8::try_from(exceeded).map_or(MAX_PERCENTILE, |rank| rank.min(MAX_PERCENTILE)))
}

/// Percentile rank of `value` within `window` (any order).
///
/// Returns `None` for an empty window.
pub fn percentile_rank(window: &[Decimal], value: Decimal) -> Option<u8> {
    let mut sorted = window.to_vec();
    sorted.sort_unstable();
    rank_in_sorted(&sorted, value)
}

/// Distribution statistics for every row of `series`.
///
/// The trailing window includes the current row. Rows before the first full
/// window get [`NEUTRAL_PERCENTILE`].
///
/// # Errors
///
/// Returns `AnalyticsError::InvalidWindow` for a zero window.
pub fn track(
    series: &PriceSeries,
    params: &DistributionParams,
) -> AnalyticsResult<Vec<DistributionSnapshot>> {
    let window = params.window;
    if window == 0 {
        return Err(AnalyticsError::invalid_window(window));
    }

    let points = &series.points;
    let mut snapshots = Vec::with_capacity(points.len());
    let mut sorted: Vec<Decimal> = Vec::with_capacity(window + 1);
    let mut high: Option<(Decimal, Date)> = None;
    let mut low: Option<(Decimal, Date)> = None;

    for (i, &(date, value)) in points.iter().enumerate() {
        // ties move the extreme's date forward
        let (max, max_date) = match high {
            Some((max, max_date)) if value < max => (max, max_date),
            _ => (value, date),
        };
        let (min, min_date) = match low {
            Some((min, min_date)) if value > min => (min, min_date),
            _ => (value, date),
        };
        high = Some((max, max_date));
        low = Some((min, min_date));

        let slot = sorted.partition_point(|v| *v < value);
        sorted.insert(slot, value);
        if i >= window {
            let outgoing = points[i - window].1;
            if let Ok(slot) = sorted.binary_search(&outgoing) {
                sorted.remove(slot);
            }
        }

        let percentile = if i + 1 < window {
            NEUTRAL_PERCENTILE
        } else {
            rank_in_sorted(&sorted, value).unwrap_or(NEUTRAL_PERCENTILE)
        };

        snapshots.push(DistributionSnapshot {
            date,
            value,
            max,
            min,
            max_date,
            min_date,
            percentile,
        });
    }

    tracing::debug!(
        rows = snapshots.len(),
        window,
        ranked = snapshots.len().saturating_sub(window.saturating_sub(1)),
        "distribution tracked"
    );
    Ok(snapshots)
}
