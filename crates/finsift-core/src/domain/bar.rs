use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// OHLC bar with optional volume.
///
/// Absent or zero volume means "no volume data" for volume-driven
/// computations; it is not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub ts: UtcDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Bar {
    pub fn new(
        ts: UtcDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<f64>,
    ) -> Result<Self, ValidationError> {
        validate_finite_non_negative("open", open)?;
        validate_finite_non_negative("high", high)?;
        validate_finite_non_negative("low", low)?;
        validate_finite_non_negative("close", close)?;
        if let Some(volume) = volume {
            validate_finite_non_negative("volume", volume)?;
        }

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            ts,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Time-ordered OHLC series for a single security.
///
/// Construction enforces strictly ascending timestamps so that positional
/// lookups ("last bar", "previous bar") are meaningful across every
/// indicator computed from the same series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bar>", into = "Vec<Bar>")]
pub struct PriceSeries(Vec<Bar>);

impl PriceSeries {
    pub fn new(bars: Vec<Bar>) -> Result<Self, ValidationError> {
        for index in 1..bars.len() {
            if bars[index].ts <= bars[index - 1].ts {
                return Err(ValidationError::SeriesNotAscending { index });
            }
        }

        Ok(Self(bars))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn bars(&self) -> &[Bar] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.0.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.0.iter().map(|bar| bar.close).collect()
    }
}

impl TryFrom<Vec<Bar>> for PriceSeries {
    type Error = ValidationError;

    fn try_from(bars: Vec<Bar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<Bar> {
    fn from(series: PriceSeries) -> Self {
        series.0
    }
}

fn validate_finite_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
