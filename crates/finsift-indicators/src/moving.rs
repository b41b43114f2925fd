use finsift_core::Bar;

use crate::{all_undefined, below_minimum_history};

/// Simple moving average of closes over a trailing `period` window.
///
/// Undefined until `period` bars are available.
pub fn sma(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    if below_minimum_history(bars.len(), period) {
        return all_undefined(bars.len());
    }

    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    sma_values(&closes, period)
}

/// Exponential moving average of closes.
///
/// Seeded at index `period - 1` with the SMA over that same window, so the
/// first defined EMA value equals the first defined SMA value. Thereafter
/// `prev + k * (close - prev)` with `k = 2 / (period + 1)`.
pub fn ema(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    if below_minimum_history(bars.len(), period) {
        return all_undefined(bars.len());
    }

    let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
    ema_values(&closes, period)
}

/// SMA over a raw value slice. Shared by Bollinger and stochastic %D.
pub(crate) fn sma_values(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut window_sum: f64 = values[..period].iter().sum();
    out[period - 1] = Some(window_sum / period as f64);

    for index in period..values.len() {
        window_sum += values[index] - values[index - period];
        out[index] = Some(window_sum / period as f64);
    }

    out
}

/// EMA over a raw value slice, SMA-seeded.
pub(crate) fn ema_values(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed: f64 = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(seed);

    let mut prev = seed;
    for index in period..values.len() {
        prev += k * (values[index] - prev);
        out[index] = Some(prev);
    }

    out
}

/// EMA over an aligned optional series whose defined values form a single
/// trailing run (the shape every warmup-prefixed indicator produces).
/// Used to derive the MACD signal line.
pub(crate) fn ema_over_options(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    let Some(first_defined) = values.iter().position(Option::is_some) else {
        return out;
    };

    let defined: Vec<f64> = values[first_defined..]
        .iter()
        .map_while(|value| *value)
        .collect();

    for (offset, value) in ema_values(&defined, period).into_iter().enumerate() {
        out[first_defined + offset] = value;
    }

    out
}
