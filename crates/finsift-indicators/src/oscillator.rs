use finsift_core::Bar;
use serde::{Deserialize, Serialize};

use crate::moving::sma_values;
use crate::{all_undefined, below_minimum_history};

/// Relative Strength Index with Wilder smoothing.
///
/// First defined at index `period` (one full window of bar-to-bar
/// differences). Output is clamped to [0, 100]: zero average loss reads
/// 100, zero average gain reads 0, a fully flat window reads 50.
pub fn rsi(bars: &[Bar], period: usize) -> Vec<Option<f64>> {
    let len = bars.len();
    if below_minimum_history(len, period) || len < period + 1 {
        return all_undefined(len);
    }

    let mut out = vec![None; len];
    let period_f = period as f64;

    let changes: Vec<f64> = bars
        .windows(2)
        .map(|pair| pair[1].close - pair[0].close)
        .collect();

    let mut avg_gain = changes[..period]
        .iter()
        .map(|&change| change.max(0.0))
        .sum::<f64>()
        / period_f;
    let mut avg_loss = changes[..period]
        .iter()
        .map(|&change| (-change).max(0.0))
        .sum::<f64>()
        / period_f;

    out[period] = Some(rsi_value(avg_gain, avg_loss));

    for index in (period + 1)..len {
        let change = changes[index - 1];
        avg_gain = (avg_gain * (period_f - 1.0) + change.max(0.0)) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + (-change).max(0.0)) / period_f;
        out[index] = Some(rsi_value(avg_gain, avg_loss));
    }

    out
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        return 50.0;
    }
    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

/// Aligned stochastic oscillator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stochastic {
    pub k: Vec<Option<f64>>,
    pub d: Vec<Option<f64>>,
}

/// Stochastic oscillator: `%K = 100 * (close - lowest_low) /
/// (highest_high - lowest_low)` over the trailing `k_period` window, `%D`
/// a `d_period` moving average of %K. A flat window (highest == lowest)
/// yields `None` at that position.
pub fn stochastic(bars: &[Bar], k_period: usize, d_period: usize) -> Stochastic {
    let len = bars.len();
    if below_minimum_history(len, k_period) || d_period == 0 {
        return Stochastic {
            k: all_undefined(len),
            d: all_undefined(len),
        };
    }

    let mut k = vec![None; len];
    for index in (k_period - 1)..len {
        let window = &bars[index + 1 - k_period..=index];
        let highest = window.iter().map(|bar| bar.high).fold(f64::MIN, f64::max);
        let lowest = window.iter().map(|bar| bar.low).fold(f64::MAX, f64::min);

        let range = highest - lowest;
        if range > 0.0 {
            k[index] = Some(100.0 * (bars[index].close - lowest) / range);
        }
    }

    let d = smooth_defined_run(&k, d_period);
    Stochastic { k, d }
}

/// Moving average over each maximal defined run of an aligned optional
/// series, preserving alignment. Positions whose window touches an
/// undefined value stay undefined, and the average never spans a gap: a
/// run that resumes after a flat-window `None` restarts its own warmup.
fn smooth_defined_run(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    let mut start = 0;

    while start < values.len() {
        if values[start].is_none() {
            start += 1;
            continue;
        }

        let run: Vec<f64> = values[start..].iter().map_while(|value| *value).collect();
        for (offset, value) in sma_values(&run, period).into_iter().enumerate() {
            out[start + offset] = value;
        }
        start += run.len();
    }

    out
}
