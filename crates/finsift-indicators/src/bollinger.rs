use finsift_core::Bar;
use serde::{Deserialize, Serialize};

use crate::moving::sma_values;
use crate::{all_undefined, below_minimum_history};

/// Aligned Bollinger band output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bollinger {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
    /// Percent bandwidth: `(upper - lower) / middle * 100`. Undefined where
    /// the middle is zero.
    pub width: Vec<Option<f64>>,
}

/// Bollinger bands over closes.
///
/// Middle is exactly `sma(period)` bar-for-bar; upper/lower are middle ±
/// `std_dev_mult` × population standard deviation over the identical
/// window, so a wider multiplier strictly widens the band at every defined
/// position.
pub fn bollinger(bars: &[Bar], period: usize, std_dev_mult: f64) -> Bollinger {
    let len = bars.len();
    if below_minimum_history(len, period) || !std_dev_mult.is_finite() {
        return Bollinger {
            upper: all_undefined(len),
            middle: all_undefined(len),
            lower: all_undefined(len),
            width: all_undefined(len),
        };
    }

    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    let middle = sma_values(&closes, period);

    let mut upper = vec![None; len];
    let mut lower = vec![None; len];
    let mut width = vec![None; len];

    for index in 0..len {
        let Some(mean) = middle[index] else {
            continue;
        };

        let window = &closes[index + 1 - period..=index];
        let variance = window
            .iter()
            .map(|close| {
                let diff = close - mean;
                diff * diff
            })
            .sum::<f64>()
            / period as f64;
        let deviation = std_dev_mult * variance.sqrt();

        let band_upper = mean + deviation;
        let band_lower = mean - deviation;
        upper[index] = Some(band_upper);
        lower[index] = Some(band_lower);
        if mean != 0.0 {
            width[index] = Some((band_upper - band_lower) / mean * 100.0);
        }
    }

    Bollinger {
        upper,
        middle,
        lower,
        width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsift_core::{PriceSeries, UtcDateTime};

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        let start = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("must parse");
        let bars: Vec<Bar> = closes
            .iter()
            .enumerate()
            .map(|(day, &close)| {
                Bar::new(
                    start.plus_days(day as i64),
                    close,
                    close + 1.0,
                    (close - 1.0).max(0.0),
                    close,
                    None,
                )
                .expect("must build")
            })
            .collect();
        PriceSeries::new(bars).expect("must build").into()
    }

    fn wavy_closes(len: usize) -> Vec<f64> {
        (0..len)
            .map(|index| 100.0 + if index % 2 == 0 { 3.0 } else { -3.0 })
            .collect()
    }

    #[test]
    fn middle_equals_sma_bar_for_bar() {
        let bars = bars_from_closes(&wavy_closes(30));
        let out = bollinger(&bars, 20, 2.0);
        let sma_out = crate::sma(&bars, 20);
        assert_eq!(out.middle, sma_out);
    }

    #[test]
    fn bands_bracket_middle_where_defined() {
        let bars = bars_from_closes(&wavy_closes(30));
        let out = bollinger(&bars, 20, 2.0);
        for index in 0..bars.len() {
            if let (Some(upper), Some(middle), Some(lower)) =
                (out.upper[index], out.middle[index], out.lower[index])
            {
                assert!(upper > middle, "upper must exceed middle at {index}");
                assert!(middle > lower, "middle must exceed lower at {index}");
            }
        }
    }

    #[test]
    fn wider_multiplier_strictly_widens_band() {
        let bars = bars_from_closes(&wavy_closes(30));
        let narrow = bollinger(&bars, 20, 2.0);
        let wide = bollinger(&bars, 20, 3.0);
        for index in 19..bars.len() {
            let narrow_span =
                narrow.upper[index].expect("defined") - narrow.lower[index].expect("defined");
            let wide_span =
                wide.upper[index].expect("defined") - wide.lower[index].expect("defined");
            assert!(wide_span > narrow_span);
        }
    }

    #[test]
    fn width_is_percent_of_middle() {
        let bars = bars_from_closes(&wavy_closes(30));
        let out = bollinger(&bars, 20, 2.0);
        let index = 25;
        let expected = (out.upper[index].expect("defined") - out.lower[index].expect("defined"))
            / out.middle[index].expect("defined")
            * 100.0;
        assert!((out.width[index].expect("defined") - expected).abs() < 1e-9);
    }

    #[test]
    fn flat_series_collapses_band_onto_middle() {
        let bars = bars_from_closes(&vec![100.0; 25]);
        let out = bollinger(&bars, 20, 2.0);
        assert_eq!(out.upper[24], Some(100.0));
        assert_eq!(out.lower[24], Some(100.0));
        assert_eq!(out.width[24], Some(0.0));
    }
}
