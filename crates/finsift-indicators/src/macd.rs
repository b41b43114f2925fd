use finsift_core::Bar;
use serde::{Deserialize, Serialize};

use crate::moving::{ema, ema_over_options};
use crate::all_undefined;

/// Aligned MACD output: line, signal, and histogram all share the input's
/// length and time axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Moving average convergence/divergence.
///
/// `macd = EMA(fast) - EMA(slow)`, `signal = EMA(signal_period)` of the
/// MACD line, `histogram = macd - signal`. The histogram sign is the
/// presentation-level "positive/negative" classification; it is not a
/// separate series.
pub fn macd(bars: &[Bar], fast: usize, slow: usize, signal_period: usize) -> Macd {
    let len = bars.len();
    if len < 2 || fast == 0 || slow == 0 || signal_period == 0 {
        return Macd {
            macd: all_undefined(len),
            signal: all_undefined(len),
            histogram: all_undefined(len),
        };
    }

    let fast_ema = ema(bars, fast);
    let slow_ema = ema(bars, slow);

    let macd_line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(fast_value, slow_value)| match (fast_value, slow_value) {
            (Some(fast_value), Some(slow_value)) => Some(fast_value - slow_value),
            _ => None,
        })
        .collect();

    let signal = ema_over_options(&macd_line, signal_period);

    let histogram: Vec<Option<f64>> = macd_line
        .iter()
        .zip(&signal)
        .map(|(macd_value, signal_value)| match (macd_value, signal_value) {
            (Some(macd_value), Some(signal_value)) => Some(macd_value - signal_value),
            _ => None,
        })
        .collect();

    Macd {
        macd: macd_line,
        signal,
        histogram,
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
                    close - 1.0,
                    close,
                    None,
                )
                .expect("must build")
            })
            .collect();
        PriceSeries::new(bars).expect("must build").into()
    }

    fn drifting_closes(len: usize) -> Vec<f64> {
        (0..len)
            .map(|index| 100.0 + index as f64 + if index % 2 == 0 { 0.5 } else { -0.5 })
            .collect()
    }

    #[test]
    fn all_three_series_share_input_length() {
        let bars = bars_from_closes(&drifting_closes(60));
        let out = macd(&bars, 12, 26, 9);
        assert_eq!(out.macd.len(), bars.len());
        assert_eq!(out.signal.len(), bars.len());
        assert_eq!(out.histogram.len(), bars.len());
    }

    #[test]
    fn macd_line_defined_from_slow_lookback() {
        let bars = bars_from_closes(&drifting_closes(60));
        let out = macd(&bars, 12, 26, 9);
        assert!(out.macd[..25].iter().all(Option::is_none));
        assert!(out.macd[25].is_some());
        // Signal needs a further signal_period - 1 defined MACD values.
        assert!(out.signal[32].is_none());
        assert!(out.signal[33].is_some());
    }

    #[test]
    fn histogram_is_macd_minus_signal() {
        let bars = bars_from_closes(&drifting_closes(60));
        let out = macd(&bars, 12, 26, 9);
        for index in 0..bars.len() {
            match (out.macd[index], out.signal[index], out.histogram[index]) {
                (Some(macd_value), Some(signal_value), Some(histogram)) => {
                    assert!((histogram - (macd_value - signal_value)).abs() < 1e-9);
                }
                (_, _, Some(_)) => panic!("histogram defined without both inputs"),
                _ => {}
            }
        }
    }

    #[test]
    fn short_series_yields_all_undefined() {
        let bars = bars_from_closes(&[100.0]);
        let out = macd(&bars, 12, 26, 9);
        assert_eq!(out.macd, vec![None]);
        assert_eq!(out.signal, vec![None]);
        assert_eq!(out.histogram, vec![None]);
    }
}
