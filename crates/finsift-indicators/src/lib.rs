//! Technical indicator library for finsift.
//!
//! Pure, stateless transforms from an OHLC series to aligned numeric
//! series. Every function upholds the same contract:
//!
//! - output length equals input length;
//! - positions before the minimum lookback are `None` (serialized as
//!   JSON `null`);
//! - no value at bar `t` depends on bars after `t`;
//! - fewer than 2 bars yields an all-`None` series of matching length;
//! - numeric edge cases (flat windows, zero denominators) yield `None`,
//!   never NaN or infinity, and never a panic.

mod bollinger;
mod directional;
mod macd;
mod moving;
mod oscillator;
mod volatility;
mod volume;

pub use bollinger::{bollinger, Bollinger};
pub use directional::{directional, Directional};
pub use macd::{macd, Macd};
pub use moving::{ema, sma};
pub use oscillator::{rsi, stochastic, Stochastic};
pub use volatility::atr;
pub use volume::obv;

/// Default RSI / ATR / directional-movement lookback.
pub const WILDER_PERIOD: usize = 14;
/// Default Bollinger / screening SMA window.
pub const BOLLINGER_PERIOD: usize = 20;
/// Default Bollinger band width in standard deviations.
pub const BOLLINGER_STD_DEV: f64 = 2.0;
/// Default MACD parameters.
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
/// Default stochastic parameters.
pub const STOCHASTIC_K_PERIOD: usize = 14;
pub const STOCHASTIC_D_PERIOD: usize = 3;

pub(crate) fn all_undefined(len: usize) -> Vec<Option<f64>> {
    vec![None; len]
}

/// True when the series is too short for any indicator to produce output.
pub(crate) fn below_minimum_history(len: usize, period: usize) -> bool {
    len < 2 || period == 0
}
