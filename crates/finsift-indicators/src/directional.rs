use finsift_core::Bar;
use serde::{Deserialize, Serialize};

use crate::{all_undefined, below_minimum_history};

/// Aligned Wilder directional-movement output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directional {
    pub adx: Vec<Option<f64>>,
    pub di_plus: Vec<Option<f64>>,
    pub di_minus: Vec<Option<f64>>,
}

/// Wilder directional movement: DI+, DI-, and ADX.
///
/// ±DM and TR are smoothed from a first-`period` sum seed via
/// `smoothed = smoothed - smoothed / period + current`;
/// `DI± = 100 * smoothed ±DM / smoothed TR` and
/// `DX = 100 * |DI+ - DI-| / (DI+ + DI-)`. ADX is seeded with the mean of
/// the first `period` DX values and Wilder-averaged afterwards, so its
/// first defined position is normally `2 * period - 1`. Zero denominators
/// leave the affected position undefined.
pub fn directional(bars: &[Bar], period: usize) -> Directional {
    let len = bars.len();
    if below_minimum_history(len, period) || len < period + 1 {
        return Directional {
            adx: all_undefined(len),
            di_plus: all_undefined(len),
            di_minus: all_undefined(len),
        };
    }

    let mut plus_dm = Vec::with_capacity(len - 1);
    let mut minus_dm = Vec::with_capacity(len - 1);
    let mut true_range = Vec::with_capacity(len - 1);

    for pair in bars.windows(2) {
        let (prev, bar) = (&pair[0], &pair[1]);
        let up_move = bar.high - prev.high;
        let down_move = prev.low - bar.low;

        plus_dm.push(if up_move > down_move && up_move > 0.0 {
            up_move
        } else {
            0.0
        });
        minus_dm.push(if down_move > up_move && down_move > 0.0 {
            down_move
        } else {
            0.0
        });

        let high_low = bar.high - bar.low;
        let high_close = (bar.high - prev.close).abs();
        let low_close = (bar.low - prev.close).abs();
        true_range.push(high_low.max(high_close).max(low_close));
    }

    let period_f = period as f64;
    let mut di_plus = vec![None; len];
    let mut di_minus = vec![None; len];
    let mut adx = vec![None; len];

    let mut smoothed_plus: f64 = plus_dm[..period].iter().sum();
    let mut smoothed_minus: f64 = minus_dm[..period].iter().sum();
    let mut smoothed_tr: f64 = true_range[..period].iter().sum();

    // ADX state: collect DX values until a full period seeds the average.
    let mut dx_seed = Vec::with_capacity(period);
    let mut adx_value: Option<f64> = None;

    for index in period..len {
        if index > period {
            let delta = index - 1;
            smoothed_plus += plus_dm[delta] - smoothed_plus / period_f;
            smoothed_minus += minus_dm[delta] - smoothed_minus / period_f;
            smoothed_tr += true_range[delta] - smoothed_tr / period_f;
        }

        if smoothed_tr <= 0.0 {
            continue;
        }

        let plus = 100.0 * smoothed_plus / smoothed_tr;
        let minus = 100.0 * smoothed_minus / smoothed_tr;
        di_plus[index] = Some(plus);
        di_minus[index] = Some(minus);

        let di_sum = plus + minus;
        if di_sum <= 0.0 {
            continue;
        }
        let dx = 100.0 * (plus - minus).abs() / di_sum;

        match adx_value {
            Some(prev) => {
                let next = (prev * (period_f - 1.0) + dx) / period_f;
                adx_value = Some(next);
                adx[index] = Some(next);
            }
            None => {
                dx_seed.push(dx);
                if dx_seed.len() == period {
                    let seed = dx_seed.iter().sum::<f64>() / period_f;
                    adx_value = Some(seed);
                    adx[index] = Some(seed);
                }
            }
        }
    }

    Directional {
        adx,
        di_plus,
        di_minus,
    }
}
