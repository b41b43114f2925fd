use finsift_core::{Security, SecurityId, Ticker};
use serde::{Deserialize, Serialize};

use crate::{Condition, Filter, IndicatorId, Snapshot};

/// Current values carried on a match for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchValues {
    pub price: f64,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub adx: Option<f64>,
    /// Last volume as a percentage of its own 20-bar average.
    pub volume_pct_avg: Option<f64>,
    pub change_1d: Option<f64>,
    pub change_5d: Option<f64>,
    pub change_20d: Option<f64>,
}

/// One screening match: identity, which filters matched, and the values
/// the presentation layer renders directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenMatch {
    pub security_id: SecurityId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<Ticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub matched_filters: Vec<String>,
    pub values: MatchValues,
    pub last_price: f64,
    pub change_1d: Option<f64>,
    pub change_5d: Option<f64>,
    pub change_20d: Option<f64>,
}

/// Run the screener: every security matching ALL enabled filters, ranked
/// by descending absolute 1-day change (absent change ranks as zero; ties
/// keep encounter order).
///
/// Securities with fewer than [`crate::MIN_HISTORY`] bars are skipped
/// silently. No enabled filters means an empty result without touching
/// any security.
pub fn screen(securities: &[Security], filters: &[Filter]) -> Vec<ScreenMatch> {
    let enabled: Vec<&Filter> = filters.iter().filter(|filter| filter.enabled).collect();
    if enabled.is_empty() {
        return Vec::new();
    }

    let mut matches = Vec::new();

    'securities: for security in securities {
        let Some(snapshot) = Snapshot::derive(security) else {
            continue;
        };

        let mut matched_filters = Vec::with_capacity(enabled.len());
        for filter in &enabled {
            if !evaluate(filter, &snapshot) {
                continue 'securities;
            }
            matched_filters.push(describe(filter));
        }

        matches.push(build_match(security, &snapshot, matched_filters));
    }

    matches.sort_by(|a, b| {
        let left = a.change_1d.unwrap_or(0.0).abs();
        let right = b.change_1d.unwrap_or(0.0).abs();
        right.total_cmp(&left)
    });

    matches
}

fn build_match(
    security: &Security,
    snapshot: &Snapshot,
    matched_filters: Vec<String>,
) -> ScreenMatch {
    ScreenMatch {
        security_id: security.id.clone(),
        name: security.name.clone(),
        ticker: security.ticker.clone(),
        isin: security.isin.clone(),
        currency: security.currency.clone(),
        matched_filters,
        values: MatchValues {
            price: snapshot.close,
            rsi: snapshot.rsi,
            macd: snapshot.macd,
            adx: snapshot.adx,
            volume_pct_avg: normalized_volume(snapshot),
            change_1d: snapshot.change_1d,
            change_5d: snapshot.change_5d,
            change_20d: snapshot.change_20d,
        },
        last_price: snapshot.close,
        change_1d: snapshot.change_1d,
        change_5d: snapshot.change_5d,
        change_20d: snapshot.change_20d,
    }
}

/// Evaluate one filter against a snapshot. Malformed filters and
/// unsupported indicator/condition pairings evaluate to false; they never
/// abort the security or the run.
pub fn evaluate(filter: &Filter, snapshot: &Snapshot) -> bool {
    match filter.condition {
        Condition::Above => match filter.indicator {
            // DI filters compare the two directional lines against each
            // other; the configured threshold is intentionally ignored.
            IndicatorId::DiPlus => both(snapshot.di_plus, snapshot.di_minus)
                .is_some_and(|(plus, minus)| plus > minus),
            IndicatorId::DiMinus => both(snapshot.di_plus, snapshot.di_minus)
                .is_some_and(|(plus, minus)| minus > plus),
            _ => resolve(filter.indicator, snapshot).is_some_and(|value| value > filter.value),
        },
        Condition::Below => {
            resolve(filter.indicator, snapshot).is_some_and(|value| value < filter.value)
        }
        Condition::CrossesAbove => crossing_pair(filter.indicator, snapshot)
            .is_some_and(|(prev, current)| prev <= filter.value && current > filter.value),
        Condition::CrossesBelow => crossing_pair(filter.indicator, snapshot)
            .is_some_and(|(prev, current)| prev >= filter.value && current < filter.value),
        Condition::Between => match filter.value2 {
            Some(value2) => resolve(filter.indicator, snapshot)
                .is_some_and(|value| filter.value <= value && value <= value2),
            None => false,
        },
        // Direction conditions are supported only for the MACD histogram.
        Condition::Increasing => filter.indicator == IndicatorId::MacdHistogram
            && both(snapshot.macd_histogram_prev, snapshot.macd_histogram)
                .is_some_and(|(prev, current)| current > prev),
        Condition::Decreasing => filter.indicator == IndicatorId::MacdHistogram
            && both(snapshot.macd_histogram_prev, snapshot.macd_histogram)
                .is_some_and(|(prev, current)| current < prev),
    }
}

/// Resolve an indicator to the numeric value its conditions compare
/// against. `None` means "no value"; the referencing filter fails.
fn resolve(indicator: IndicatorId, snapshot: &Snapshot) -> Option<f64> {
    match indicator {
        IndicatorId::Price => Some(snapshot.close),
        IndicatorId::Volume => {
            let volume = snapshot.volume?;
            let average = snapshot.avg_volume_20?;
            if average > 0.0 {
                Some(volume / average * 100.0)
            } else {
                None
            }
        }
        IndicatorId::Rsi => snapshot.rsi,
        IndicatorId::Macd => snapshot.macd,
        IndicatorId::MacdSignal => snapshot.macd_signal,
        IndicatorId::MacdHistogram => snapshot.macd_histogram,
        IndicatorId::BollingerUpper => price_pct_of_band(snapshot.close, snapshot.bollinger_upper),
        IndicatorId::BollingerLower => price_pct_of_band(snapshot.close, snapshot.bollinger_lower),
        IndicatorId::BollingerWidth => snapshot.bollinger_width,
        IndicatorId::StochasticK => snapshot.stochastic_k,
        IndicatorId::StochasticD => snapshot.stochastic_d,
        IndicatorId::Adx => snapshot.adx,
        IndicatorId::DiPlus => snapshot.di_plus,
        IndicatorId::DiMinus => snapshot.di_minus,
        IndicatorId::Obv => snapshot.obv,
        IndicatorId::Sma20 => snapshot.sma_20,
        IndicatorId::Sma50 => snapshot.sma_50,
        IndicatorId::Sma200 => snapshot.sma_200,
        IndicatorId::Change1d => snapshot.change_1d,
        IndicatorId::Change5d => snapshot.change_5d,
        IndicatorId::Change20d => snapshot.change_20d,
    }
}

/// Price as a percentage of a Bollinger band level.
fn price_pct_of_band(close: f64, band: Option<f64>) -> Option<f64> {
    let band = band?;
    if band == 0.0 {
        return None;
    }
    Some(close / band * 100.0)
}

/// Previous/current pair for crossing conditions. Only the stochastic
/// oscillator lines track a previous value for crossings.
fn crossing_pair(indicator: IndicatorId, snapshot: &Snapshot) -> Option<(f64, f64)> {
    match indicator {
        IndicatorId::StochasticK => both(snapshot.stochastic_k_prev, snapshot.stochastic_k),
        IndicatorId::StochasticD => both(snapshot.stochastic_d_prev, snapshot.stochastic_d),
        _ => None,
    }
}

fn both(left: Option<f64>, right: Option<f64>) -> Option<(f64, f64)> {
    Some((left?, right?))
}

fn normalized_volume(snapshot: &Snapshot) -> Option<f64> {
    resolve(IndicatorId::Volume, snapshot)
}

/// Human-readable description of a matched filter.
pub fn describe(filter: &Filter) -> String {
    match (filter.indicator, filter.condition) {
        (IndicatorId::DiPlus, Condition::Above) => String::from("DI+ above DI-"),
        (IndicatorId::DiMinus, Condition::Above) => String::from("DI- above DI+"),
        (indicator, Condition::Increasing) => format!("{} increasing", indicator.label()),
        (indicator, Condition::Decreasing) => format!("{} decreasing", indicator.label()),
        (indicator, Condition::Between) => match filter.value2 {
            Some(value2) => format!(
                "{} between {} and {}",
                indicator.label(),
                filter.value,
                value2
            ),
            None => format!("{} between {} and ?", indicator.label(), filter.value),
        },
        (indicator, condition) => {
            format!("{} {} {}", indicator.label(), condition.label(), filter.value)
        }
    }
}
