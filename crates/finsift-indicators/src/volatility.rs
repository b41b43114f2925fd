use finsift_core::Bar;

use crate::{all_undefined, below_minimum_history};

/// Average True Range with Wilder smoothing.
///
/// `TR = max(high - low, |high - prev_close|, |low - prev_close|)`; the
/// first defined value, at index `period`, is the simple mean of the first
/// `period` true ranges, after which
/// `atr = (prev * (period - 1) + tr) / period`.
pub fn atr(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    let len = bars.len();
    if below_minimum_history(len, period) || len < period + 1 {
        return all_undefined(len);
    }

    let true_ranges: Vec<f64> = bars
        .windows(2)
        .map(|pair| true_range(&pair[1], &pair[0]))
        .collect();

    let period_f = period as f64;
    let mut out = vec![None; len];

    let mut value = true_ranges[..period].iter().sum::<f64>() / period_f;
    out[period] = Some(value);

    for index in (period + 1)..len {
        value = (value * (period_f - 1.0) + true_ranges[index - 1]) / period_f;
        out[index] = Some(value);
    }

    out
}

fn true_range(bar: &Bar, prev: &Bar) -> f64 {
    let high_low = bar.high - bar.low;
    let high_close = (bar.high - prev.close).abs();
    let low_close = (bar.low - prev.close).abs();
    high_low.max(high_close).max(low_close)
}
