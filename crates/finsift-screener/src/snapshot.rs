use finsift_core::{Bar, Security};
use finsift_indicators::{
    bollinger, directional, macd, obv, rsi, sma, stochastic, BOLLINGER_PERIOD, BOLLINGER_STD_DEV,
    MACD_FAST, MACD_SIGNAL, MACD_SLOW, STOCHASTIC_D_PERIOD, STOCHASTIC_K_PERIOD, WILDER_PERIOD,
};
use serde::{Deserialize, Serialize};

/// Minimum bars a security needs before it can be screened at all.
pub const MIN_HISTORY: usize = 20;

/// Current indicator values for one security: the last bar of every series
/// the filter vocabulary can reference, plus the previous bar where a
/// condition needs it (crossings, histogram direction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub close: f64,
    pub volume: Option<f64>,
    /// Mean volume over the trailing 20 bars; absent volume counts as zero.
    pub avg_volume_20: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub macd_histogram_prev: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub bollinger_width: Option<f64>,
    pub stochastic_k: Option<f64>,
    pub stochastic_k_prev: Option<f64>,
    pub stochastic_d: Option<f64>,
    pub stochastic_d_prev: Option<f64>,
    pub adx: Option<f64>,
    pub di_plus: Option<f64>,
    pub di_minus: Option<f64>,
    pub obv: Option<f64>,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub change_1d: Option<f64>,
    pub change_5d: Option<f64>,
    pub change_20d: Option<f64>,
}

impl Snapshot {
    /// Derive the snapshot for one security, or `None` when its history is
    /// below [`MIN_HISTORY`] bars. Insufficient lookback for any single
    /// indicator leaves that field `None`; it never fails the derivation.
    pub fn derive(security: &Security) -> Option<Self> {
        let bars = security.bars.bars();
        if bars.len() < MIN_HISTORY {
            return None;
        }

        let last_bar = bars.last()?;
        let macd_out = macd(bars, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
        let bollinger_out = bollinger(bars, BOLLINGER_PERIOD, BOLLINGER_STD_DEV);
        let stochastic_out = stochastic(bars, STOCHASTIC_K_PERIOD, STOCHASTIC_D_PERIOD);
        let directional_out = directional(bars, WILDER_PERIOD);

        Some(Self {
            close: last_bar.close,
            volume: last_bar.volume,
            avg_volume_20: Some(trailing_average_volume(bars, MIN_HISTORY)),
            rsi: last(&rsi(bars, WILDER_PERIOD)),
            macd: last(&macd_out.macd),
            macd_signal: last(&macd_out.signal),
            macd_histogram: last(&macd_out.histogram),
            macd_histogram_prev: previous(&macd_out.histogram),
            bollinger_upper: last(&bollinger_out.upper),
            bollinger_lower: last(&bollinger_out.lower),
            bollinger_width: last(&bollinger_out.width),
            stochastic_k: last(&stochastic_out.k),
            stochastic_k_prev: previous(&stochastic_out.k),
            stochastic_d: last(&stochastic_out.d),
            stochastic_d_prev: previous(&stochastic_out.d),
            adx: last(&directional_out.adx),
            di_plus: last(&directional_out.di_plus),
            di_minus: last(&directional_out.di_minus),
            obv: last(&obv(bars)),
            sma_20: last(&sma(bars, 20)),
            sma_50: last(&sma(bars, 50)),
            sma_200: last(&sma(bars, 200)),
            change_1d: percent_change(bars, 1),
            change_5d: percent_change(bars, 5),
            change_20d: percent_change(bars, 20),
        })
    }
}

fn last(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

fn previous(series: &[Option<f64>]) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    series[series.len() - 2]
}

fn trailing_average_volume(bars: &[Bar], window: usize) -> f64 {
    let tail = &bars[bars.len() - window..];
    tail.iter()
        .map(|bar| bar.volume.unwrap_or(0.0))
        .sum::<f64>()
        / window as f64
}

/// Percent price change over `lookback` bars:
/// `(last - prior) / prior * 100`. Undefined when the series is too short
/// for that specific lookback or the prior close is zero.
fn percent_change(bars: &[Bar], lookback: usize) -> Option<f64> {
    if bars.len() <= lookback {
        return None;
    }

    let latest = bars.last()?.close;
    let prior = bars[bars.len() - 1 - lookback].close;
    if prior == 0.0 {
        return None;
    }

    Some((latest - prior) / prior * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use finsift_core::{PriceSeries, SecurityId, UtcDateTime};

    fn security_with_closes(closes: &[f64]) -> Security {
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
                    Some(1_000.0),
                )
                .expect("must build")
            })
            .collect();
        Security::new(
            SecurityId::parse("sec-1").expect("must parse"),
            "Test Security",
            None,
            None,
            None,
            PriceSeries::new(bars).expect("must build"),
        )
        .expect("must build")
    }

    #[test]
    fn below_minimum_history_yields_none() {
        let closes: Vec<f64> = (0..19).map(|index| 100.0 + index as f64).collect();
        assert!(Snapshot::derive(&security_with_closes(&closes)).is_none());
    }

    #[test]
    fn derives_at_exactly_minimum_history() {
        let closes: Vec<f64> = (0..20).map(|index| 100.0 + 2.0 * index as f64).collect();
        let snapshot = Snapshot::derive(&security_with_closes(&closes)).expect("must derive");
        assert_eq!(snapshot.close, 138.0);
        assert!(snapshot.rsi.is_some());
        assert!(snapshot.sma_20.is_some());
        // Not enough history for the longer windows.
        assert!(snapshot.sma_50.is_none());
        assert!(snapshot.sma_200.is_none());
        assert!(snapshot.macd.is_none());
        assert!(snapshot.change_20d.is_none());
    }

    #[test]
    fn percent_changes_match_definition() {
        let closes: Vec<f64> = (0..21).map(|index| 100.0 + index as f64).collect();
        let snapshot = Snapshot::derive(&security_with_closes(&closes)).expect("must derive");
        let change_1d = snapshot.change_1d.expect("defined");
        assert!((change_1d - (120.0 - 119.0) / 119.0 * 100.0).abs() < 1e-9);
        let change_20d = snapshot.change_20d.expect("defined");
        assert!((change_20d - 20.0).abs() < 1e-9);
    }

    #[test]
    fn average_volume_counts_missing_as_zero() {
        let start = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("must parse");
        let bars: Vec<Bar> = (0..20)
            .map(|day| {
                let volume = if day % 2 == 0 { Some(2_000.0) } else { None };
                Bar::new(
                    start.plus_days(day as i64),
                    100.0,
                    101.0,
                    99.0,
                    100.0,
                    volume,
                )
                .expect("must build")
            })
            .collect();
        let security = Security::new(
            SecurityId::parse("sec-1").expect("must parse"),
            "Test Security",
            None,
            None,
            None,
            PriceSeries::new(bars).expect("must build"),
        )
        .expect("must build");

        let snapshot = Snapshot::derive(&security).expect("must derive");
        assert_eq!(snapshot.avg_volume_20, Some(1_000.0));
    }
}
