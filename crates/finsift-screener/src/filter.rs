use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when parsing filter vocabulary from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("unknown indicator '{value}'")]
    UnknownIndicator { value: String },
    #[error("unknown condition '{value}'")]
    UnknownCondition { value: String },
}

/// Closed set of screenable indicator values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorId {
    Price,
    Volume,
    Rsi,
    Macd,
    MacdSignal,
    MacdHistogram,
    BollingerUpper,
    BollingerLower,
    BollingerWidth,
    StochasticK,
    StochasticD,
    Adx,
    DiPlus,
    DiMinus,
    Obv,
    Sma20,
    Sma50,
    Sma200,
    Change1d,
    Change5d,
    Change20d,
}

impl IndicatorId {
    pub const ALL: [Self; 21] = [
        Self::Price,
        Self::Volume,
        Self::Rsi,
        Self::Macd,
        Self::MacdSignal,
        Self::MacdHistogram,
        Self::BollingerUpper,
        Self::BollingerLower,
        Self::BollingerWidth,
        Self::StochasticK,
        Self::StochasticD,
        Self::Adx,
        Self::DiPlus,
        Self::DiMinus,
        Self::Obv,
        Self::Sma20,
        Self::Sma50,
        Self::Sma200,
        Self::Change1d,
        Self::Change5d,
        Self::Change20d,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Volume => "volume",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::MacdSignal => "macd_signal",
            Self::MacdHistogram => "macd_histogram",
            Self::BollingerUpper => "bollinger_upper",
            Self::BollingerLower => "bollinger_lower",
            Self::BollingerWidth => "bollinger_width",
            Self::StochasticK => "stochastic_k",
            Self::StochasticD => "stochastic_d",
            Self::Adx => "adx",
            Self::DiPlus => "di_plus",
            Self::DiMinus => "di_minus",
            Self::Obv => "obv",
            Self::Sma20 => "sma_20",
            Self::Sma50 => "sma_50",
            Self::Sma200 => "sma_200",
            Self::Change1d => "change_1d",
            Self::Change5d => "change_5d",
            Self::Change20d => "change_20d",
        }
    }

    /// Human-readable label used in match descriptions.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::Volume => "Volume vs 20-day average",
            Self::Rsi => "RSI",
            Self::Macd => "MACD",
            Self::MacdSignal => "MACD signal",
            Self::MacdHistogram => "MACD histogram",
            Self::BollingerUpper => "Price vs upper Bollinger band",
            Self::BollingerLower => "Price vs lower Bollinger band",
            Self::BollingerWidth => "Bollinger band width",
            Self::StochasticK => "Stochastic %K",
            Self::StochasticD => "Stochastic %D",
            Self::Adx => "ADX",
            Self::DiPlus => "DI+",
            Self::DiMinus => "DI-",
            Self::Obv => "On-balance volume",
            Self::Sma20 => "SMA 20",
            Self::Sma50 => "SMA 50",
            Self::Sma200 => "SMA 200",
            Self::Change1d => "1-day change",
            Self::Change5d => "5-day change",
            Self::Change20d => "20-day change",
        }
    }
}

impl Display for IndicatorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorId {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or(FilterParseError::UnknownIndicator { value: normalized })
    }
}

/// Closed set of filter conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Above,
    Below,
    CrossesAbove,
    CrossesBelow,
    Between,
    Increasing,
    Decreasing,
}

impl Condition {
    pub const ALL: [Self; 7] = [
        Self::Above,
        Self::Below,
        Self::CrossesAbove,
        Self::CrossesBelow,
        Self::Between,
        Self::Increasing,
        Self::Decreasing,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
            Self::CrossesAbove => "crosses_above",
            Self::CrossesBelow => "crosses_below",
            Self::Between => "between",
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
            Self::CrossesAbove => "crosses above",
            Self::CrossesBelow => "crosses below",
            Self::Between => "between",
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
        }
    }
}

impl Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = FilterParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|condition| condition.as_str() == normalized)
            .ok_or(FilterParseError::UnknownCondition { value: normalized })
    }
}

/// One screening rule.
///
/// `value2` is meaningful only for [`Condition::Between`]; filters with
/// `enabled == false` are excluded from evaluation entirely rather than
/// treated as always-true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub id: String,
    pub indicator: IndicatorId,
    pub condition: Condition,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<f64>,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

impl Filter {
    pub fn new(
        id: impl Into<String>,
        indicator: IndicatorId,
        condition: Condition,
        value: f64,
    ) -> Self {
        Self {
            id: id.into(),
            indicator,
            condition,
            value,
            value2: None,
            enabled: true,
        }
    }

    pub fn with_value2(mut self, value2: f64) -> Self {
        self.value2 = Some(value2);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
