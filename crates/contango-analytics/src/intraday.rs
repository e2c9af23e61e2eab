//! Intraday move classification for live futures quotes.
//!
//! A quote is unusual when the session high or low has moved at least a
//! threshold away from the previous settlement. The threshold is a fraction of
//! the previous settlement with an absolute floor:
//!
//! ```text
//! threshold = max(prev_settle * move_fraction, min_move)
//! pin       = threshold * 2 / 3
//! ```
//!
//! A move that has since retraced by at least `pin` is a pin; one that has
//! not is a breakout. The high side is checked first.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of classifying one quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntradayState {
    /// No move beyond the threshold.
    Normal,
    /// Traded up through the threshold and is still near the high.
    High,
    /// Traded up through the threshold, then fell back by at least the pin.
    PinUp,
    /// Traded down through the threshold and is still near the low.
    Low,
    /// Traded down through the threshold, then recovered by at least the pin.
    PinDown,
}

impl IntradayState {
    /// True for every state except [`IntradayState::Normal`].
    pub fn is_warning(self) -> bool {
        self != Self::Normal
    }
}

/// Thresholds for [`classify_quote`] and [`intraday_warnings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntradayParams {
    /// Threshold as a fraction of the previous settlement.
    pub move_fraction: Decimal,
    /// Absolute floor of the threshold, in price points.
    pub min_move: Decimal,
    /// Quotes traded below this volume are ignored.
    pub min_volume: u64,
}

impl IntradayParams {
    /// Default minimum volume.
    pub const DEFAULT_MIN_VOLUME: u64 = 100;

    /// Parameters with the given threshold rule and the default volume floor.
    pub fn new(move_fraction: Decimal, min_move: Decimal) -> Self {
        Self {
            move_fraction,
            min_move,
            min_volume: Self::DEFAULT_MIN_VOLUME,
        }
    }

    /// Sets the volume floor.
    pub fn min_volume(mut self, volume: u64) -> Self {
        self.min_volume = volume;
        self
    }

    /// Move needed from `prev_settle` for a quote to be unusual.
    pub fn threshold(&self, prev_settle: Decimal) -> Decimal {
        (prev_settle * self.move_fraction).max(self.min_move)
    }
}

impl Default for IntradayParams {
    /// Ten percent of the previous settlement, at least five points.
    fn default() -> Self {
        Self::new(Decimal::new(1, 1), Decimal::from(5))
    }
}

/// Classifies a session from its previous settlement, high, low and last
/// traded price.
pub fn classify_quote(
    prev_settle: Decimal,
    high: Decimal,
    low: Decimal,
    last: Decimal,
    params: &IntradayParams,
) -> IntradayState {
    let threshold = params.threshold(prev_settle);
    let pin = threshold * Decimal::TWO / Decimal::from(3);

    if high - prev_settle >= threshold {
        if high - last >= pin {
            IntradayState::PinUp
        } else {
            IntradayState::High
        }
    } else if (prev_settle - low).abs() >= threshold {
        if last - low >= pin {
            IntradayState::PinDown
        } else {
            IntradayState::Low
        }
    } else {
        IntradayState::Normal
    }
}

/// One contract's live quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntradayQuote {
    /// Contract symbol.
    pub symbol: String,
    /// Previous session's settlement.
    pub prev_settle: Decimal,
    /// Session high.
    pub high: Decimal,
    /// Session low.
    pub low: Decimal,
    /// Last traded price.
    pub last: Decimal,
    /// Session volume, `None` when the exchange reports none.
    pub volume: Option<u64>,
}

/// A quote classified as unusual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntradayWarning {
    /// Classification.
    pub state: IntradayState,
    /// The quote that triggered it.
    pub quote: IntradayQuote,
}

/// Classifies `quotes`, keeping the unusual ones in input order.
///
/// Quotes without volume or below `params.min_volume` are skipped.
pub fn intraday_warnings(quotes: &[IntradayQuote], params: &IntradayParams) -> Vec<IntradayWarning> {
    let warnings: Vec<IntradayWarning> = quotes
        .iter()
        .filter(|quote| quote.volume.is_some_and(|v| v >= params.min_volume))
        .filter_map(|quote| {
            let state = classify_quote(quote.prev_settle, quote.high, quote.low, quote.last, params);
            state.is_warning().then(|| IntradayWarning {
                state,
                quote: quote.clone(),
            })
        })
        .collect();

    tracing::debug!(quotes = quotes.len(), warnings = warnings.len(), "intraday quotes classified");
    warnings
}

/// True if both lists flag the same symbols with the same states, in order.
///
/// Used to suppress a repeat of an unchanged set of warnings.
pub fn same_warnings(a: &[IntradayWarning], b: &[IntradayWarning]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x.state == y.state && x.quote.symbol == y.quote.symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn classify(prev: Decimal, high: Decimal, low: Decimal, last: Decimal) -> IntradayState {
        classify_quote(prev, high, low, last, &IntradayParams::default())
    }

    fn quote(symbol: &str, high: Decimal, last: Decimal, volume: Option<u64>) -> IntradayQuote {
        IntradayQuote {
            symbol: symbol.to_string(),
            prev_settle: dec!(20),
            high,
            low: dec!(19),
            last,
            volume,
        }
    }

    #[test]
    fn test_threshold_floor() {
        let params = IntradayParams::default();
        assert_eq!(params.threshold(dec!(20)), dec!(5));
        assert_eq!(params.threshold(dec!(60)), dec!(6.0));
    }

    #[test]
    fn test_all_states() {
        // threshold 5, pin 3.33
        assert_eq!(classify(dec!(20), dec!(23), dec!(17), dec!(21)), IntradayState::Normal);
        assert_eq!(classify(dec!(20), dec!(26), dec!(19), dec!(25)), IntradayState::High);
        assert_eq!(classify(dec!(20), dec!(26), dec!(19), dec!(22)), IntradayState::PinUp);
        assert_eq!(classify(dec!(20), dec!(21), dec!(14), dec!(15)), IntradayState::Low);
        assert_eq!(classify(dec!(20), dec!(21), dec!(14), dec!(18)), IntradayState::PinDown);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert_eq!(classify(dec!(20), dec!(25), dec!(19), dec!(25)), IntradayState::High);
        assert_eq!(classify(dec!(20), dec!(21), dec!(15), dec!(15)), IntradayState::Low);
    }

    #[test]
    fn test_threshold_scales_with_settlement() {
        // threshold 6 at a settlement of 60
        assert_eq!(classify(dec!(60), dec!(65), dec!(59), dec!(65)), IntradayState::Normal);
        assert_eq!(classify(dec!(60), dec!(66), dec!(59), dec!(66)), IntradayState::High);
    }

    #[test]
    fn test_high_side_checked_first() {
        assert_eq!(classify(dec!(20), dec!(26), dec!(14), dec!(25)), IntradayState::High);
    }

    #[test]
    fn test_fixed_threshold() {
        let params = IntradayParams::new(Decimal::ZERO, dec!(0.1));
        assert_eq!(
            classify_quote(dec!(20), dec!(20.1), dec!(20), dec!(20.1), &params),
            IntradayState::High
        );
    }

    #[test]
    fn test_volume_cut() {
        let quotes = vec![
            quote("VX/U0", dec!(26), dec!(25), Some(100)),
            quote("VX/V0", dec!(26), dec!(25), Some(99)),
            quote("VX/X0", dec!(26), dec!(25), None),
            quote("VX/Z0", dec!(21), dec!(20), Some(5000)),
            quote("VX/F1", dec!(26), dec!(22), Some(5000)),
        ];
        let warnings = intraday_warnings(&quotes, &IntradayParams::default());
        let flagged: Vec<(&str, IntradayState)> = warnings
            .iter()
            .map(|w| (w.quote.symbol.as_str(), w.state))
            .collect();
        assert_eq!(
            flagged,
            vec![("VX/U0", IntradayState::High), ("VX/F1", IntradayState::PinUp)]
        );

        // a missing volume is skipped whatever the floor
        let lenient = IntradayParams::default().min_volume(0);
        assert_eq!(intraday_warnings(&quotes, &lenient).len(), 3);
    }

    #[test]
    fn test_same_warnings() {
        let params = IntradayParams::default();
        let first = intraday_warnings(&[quote("VX/U0", dec!(26), dec!(25), Some(500))], &params);
        // prices moved but the flagged state did not
        let repeat = intraday_warnings(&[quote("VX/U0", dec!(27), dec!(26.5), Some(900))], &params);
        let retraced = intraday_warnings(&[quote("VX/U0", dec!(27), dec!(22), Some(900))], &params);
        let other = intraday_warnings(&[quote("VX/V0", dec!(26), dec!(25), Some(500))], &params);

        assert!(same_warnings(&first, &repeat));
        assert!(!same_warnings(&first, &retraced));
        assert!(!same_warnings(&first, &other));
        assert!(!same_warnings(&first, &[]));
        assert!(same_warnings(&[], &[]));
    }
}
