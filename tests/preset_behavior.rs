//! Behavior-driven tests for the preset catalog.

use std::collections::HashSet;

use finsift_screener::{apply_preset, preset_catalog, screen, Condition, Filter, IndicatorId};
use finsift_tests::{rising_closes, security};

#[test]
fn every_catalog_preset_instantiates_into_enabled_filters() {
    for preset in preset_catalog() {
        let filters = apply_preset(&preset);
        assert_eq!(filters.len(), preset.filters.len(), "preset {}", preset.id);
        assert!(filters.iter().all(|filter| filter.enabled));
        for (filter, template) in filters.iter().zip(&preset.filters) {
            assert_eq!(filter.indicator, template.indicator);
            assert_eq!(filter.condition, template.condition);
            assert_eq!(filter.value, template.value);
            assert_eq!(filter.value2, template.value2);
        }
    }
}

#[test]
fn ids_stay_unique_across_the_whole_catalog_and_repeated_application() {
    let catalog = preset_catalog();
    let mut ids = HashSet::new();
    let mut total = 0;

    for _ in 0..3 {
        for preset in &catalog {
            for filter in apply_preset(preset) {
                assert!(!filter.id.is_empty());
                ids.insert(filter.id);
                total += 1;
            }
        }
    }

    assert_eq!(ids.len(), total);
}

#[test]
fn applied_preset_screens_like_its_manual_equivalent() {
    // Given: The overbought-warning preset and hand-built filters with the
    // same vocabulary
    let catalog = preset_catalog();
    let preset = catalog
        .iter()
        .find(|preset| preset.id == "overbought-warning")
        .expect("catalog entry");
    let manual = vec![
        Filter::new("m1", IndicatorId::Rsi, Condition::Above, 70.0),
        Filter::new("m2", IndicatorId::StochasticK, Condition::Above, 80.0),
    ];

    let universe = vec![
        security("riser", &rising_closes(30, 100.0, 2.0)),
        security("faller", &rising_closes(30, 180.0, -2.0)),
    ];

    // When: Screening with both filter sets
    let from_preset = screen(&universe, &apply_preset(preset));
    let from_manual = screen(&universe, &manual);

    // Then: The same securities match, with the same descriptions
    assert_eq!(from_preset.len(), 1);
    assert_eq!(from_preset[0].security_id.as_str(), "riser");
    assert_eq!(from_preset[0].matched_filters, from_manual[0].matched_filters);
}

#[test]
fn oversold_preset_rejects_a_rising_security() {
    let catalog = preset_catalog();
    let preset = catalog
        .iter()
        .find(|preset| preset.id == "oversold-reversal")
        .expect("catalog entry");

    let universe = vec![security("riser", &rising_closes(30, 100.0, 2.0))];
    assert!(screen(&universe, &apply_preset(preset)).is_empty());
}

#[test]
fn quiet_consolidation_matches_a_flat_series() {
    // Flat closes: zero band width and a neutral RSI of 50.
    let catalog = preset_catalog();
    let preset = catalog
        .iter()
        .find(|preset| preset.id == "quiet-consolidation")
        .expect("catalog entry");

    let universe = vec![security("flat", &vec![100.0; 30])];
    let results = screen(&universe, &apply_preset(preset));

    assert_eq!(results.len(), 1);
    assert!(results[0]
        .matched_filters
        .iter()
        .any(|description| description == "RSI between 40 and 60"));
}
