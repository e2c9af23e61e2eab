//! Property-based tests for the distribution tracker.

use contango_analytics::{
    percentile_rank, running_extremes, track, DistributionParams, PriceSeries, NEUTRAL_PERCENTILE,
};
use contango_core::Date;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn values(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec((1i64..5_000).prop_map(|cents| Decimal::new(cents, 2)), 1..max_len)
}

fn series(values: &[Decimal]) -> PriceSeries {
    let start = Date::parse("2015-01-02").unwrap();
    PriceSeries::from_points(
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (start.add_days(i as i64), *v))
            .collect(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn prop_extremes_bracket_every_prefix(values in values(200)) {
        let (max, min) = running_extremes(&values);
        for i in 0..values.len() {
            let prefix = &values[..=i];
            prop_assert_eq!(Some(&max[i]), prefix.iter().max());
            prop_assert_eq!(Some(&min[i]), prefix.iter().min());
        }
    }

    #[test]
    fn prop_rank_is_monotone(window in values(300), a in 1i64..5_000, b in 1i64..5_000) {
        let (low, high) = (Decimal::new(a.min(b), 2), Decimal::new(a.max(b), 2));
        let low_rank = percentile_rank(&window, low).unwrap();
        let high_rank = percentile_rank(&window, high).unwrap();
        prop_assert!(low_rank <= high_rank);
        prop_assert!(high_rank <= 99);
    }

    #[test]
    fn prop_tracker_matches_direct_rank(values in values(160), window in 1usize..60) {
        let snaps = track(&series(&values), &DistributionParams::new(window)).unwrap();
        prop_assert_eq!(snaps.len(), values.len());
        for (i, snap) in snaps.iter().enumerate() {
            if i + 1 < window {
                prop_assert_eq!(snap.percentile, NEUTRAL_PERCENTILE);
            } else {
                let trailing = &values[i + 1 - window..=i];
                prop_assert_eq!(Some(snap.percentile), percentile_rank(trailing, values[i]));
            }
        }
    }

    #[test]
    fn prop_short_history_is_always_neutral(values in values(200)) {
        let snaps = track(&series(&values), &DistributionParams::default()).unwrap();
        prop_assert!(snaps.iter().all(|s| s.percentile == NEUTRAL_PERCENTILE));
    }
}
