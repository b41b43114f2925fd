use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Condition, Filter, IndicatorId};

/// Filter template inside a preset: no id, no enabled flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetFilter {
    pub indicator: IndicatorId,
    pub condition: Condition,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value2: Option<f64>,
}

impl PresetFilter {
    const fn new(indicator: IndicatorId, condition: Condition, value: f64) -> Self {
        Self {
            indicator,
            condition,
            value,
            value2: None,
        }
    }

    fn with_value2(mut self, value2: f64) -> Self {
        self.value2 = Some(value2);
        self
    }
}

/// Named bundle of filter templates offered as a one-click starting point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub filters: Vec<PresetFilter>,
}

/// The static preset catalog.
pub fn preset_catalog() -> Vec<Preset> {
    vec![
        Preset {
            id: "oversold-reversal",
            name: "Oversold reversal",
            description: "Washed-out momentum: RSI and stochastic both in oversold territory",
            filters: vec![
                PresetFilter::new(IndicatorId::Rsi, Condition::Below, 30.0),
                PresetFilter::new(IndicatorId::StochasticK, Condition::Below, 20.0),
            ],
        },
        Preset {
            id: "overbought-warning",
            name: "Overbought warning",
            description: "Stretched momentum: RSI and stochastic both in overbought territory",
            filters: vec![
                PresetFilter::new(IndicatorId::Rsi, Condition::Above, 70.0),
                PresetFilter::new(IndicatorId::StochasticK, Condition::Above, 80.0),
            ],
        },
        Preset {
            id: "momentum-breakout",
            name: "Momentum breakout",
            description: "Accelerating MACD histogram with bullish RSI and elevated volume",
            filters: vec![
                PresetFilter::new(IndicatorId::MacdHistogram, Condition::Increasing, 0.0),
                PresetFilter::new(IndicatorId::Rsi, Condition::Above, 50.0),
                PresetFilter::new(IndicatorId::Volume, Condition::Above, 150.0),
            ],
        },
        Preset {
            id: "trend-strength",
            name: "Trend strength",
            description: "Established uptrend: trending ADX with DI+ leading DI-",
            filters: vec![
                PresetFilter::new(IndicatorId::Adx, Condition::Above, 25.0),
                PresetFilter::new(IndicatorId::DiPlus, Condition::Above, 0.0),
                PresetFilter::new(IndicatorId::Change20d, Condition::Above, 0.0),
            ],
        },
        Preset {
            id: "volume-surge",
            name: "Volume surge",
            description: "Volume at least double its 20-day average on a rising day",
            filters: vec![
                PresetFilter::new(IndicatorId::Volume, Condition::Above, 200.0),
                PresetFilter::new(IndicatorId::Change1d, Condition::Above, 0.0),
            ],
        },
        Preset {
            id: "quiet-consolidation",
            name: "Quiet consolidation",
            description: "Tight Bollinger bands with RSI in the neutral zone",
            filters: vec![
                PresetFilter::new(IndicatorId::BollingerWidth, Condition::Below, 10.0),
                PresetFilter::new(IndicatorId::Rsi, Condition::Between, 40.0).with_value2(60.0),
            ],
        },
    ]
}

/// Instantiate a preset into concrete filters: each template receives a
/// freshly generated unique id and starts enabled. Repeated application
/// never collides on id.
pub fn apply_preset(preset: &Preset) -> Vec<Filter> {
    preset
        .filters
        .iter()
        .map(|template| Filter {
            id: Uuid::new_v4().to_string(),
            indicator: template.indicator,
            condition: template.condition,
            value: template.value,
            value2: template.value2,
            enabled: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let catalog = preset_catalog();
        let ids: HashSet<&str> = catalog.iter().map(|preset| preset.id).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn every_between_template_carries_value2() {
        for preset in preset_catalog() {
            for template in &preset.filters {
                if template.condition == Condition::Between {
                    assert!(template.value2.is_some(), "preset {}", preset.id);
                }
            }
        }
    }

    #[test]
    fn applied_filters_are_enabled_with_fresh_ids() {
        let catalog = preset_catalog();
        let preset = &catalog[0];

        let first = apply_preset(preset);
        let second = apply_preset(preset);

        assert_eq!(first.len(), preset.filters.len());
        assert!(first.iter().all(|filter| filter.enabled));

        let ids: HashSet<&String> = first.iter().chain(&second).map(|filter| &filter.id).collect();
        assert_eq!(ids.len(), first.len() + second.len(), "ids must never collide");
    }

    #[test]
    fn applied_filters_preserve_template_values() {
        let catalog = preset_catalog();
        let preset = catalog
            .iter()
            .find(|preset| preset.id == "quiet-consolidation")
            .expect("catalog entry");
        let filters = apply_preset(preset);
        let between = filters
            .iter()
            .find(|filter| filter.condition == Condition::Between)
            .expect("between filter");
        assert_eq!(between.value, 40.0);
        assert_eq!(between.value2, Some(60.0));
    }
}
