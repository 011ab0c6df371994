//! Unit tests for chart-variant selection

use signalscope::models::{SignalCategory, SignalStrength};
use signalscope::signals::{
    auto_variant, chart_sections, select_variant, ChartVariant, VariantRequest,
};

use crate::common_fixtures::{signal, signals_with_confidences};

#[test]
fn test_empty_set_selects_empty() {
    assert_eq!(auto_variant(&[]), ChartVariant::Empty);
}

#[test]
fn test_four_categories_select_radar_regardless_of_confidence() {
    for confidences in [[0.1, 0.9, 0.1, 0.9], [0.5, 0.5, 0.5, 0.5]] {
        let signals = vec![
            signal(SignalCategory::Rsi, SignalStrength::Neutral, confidences[0]),
            signal(SignalCategory::Macd, SignalStrength::Bullish, confidences[1]),
            signal(SignalCategory::Stochastic, SignalStrength::Bearish, confidences[2]),
            signal(SignalCategory::Fibonacci, SignalStrength::Neutral, confidences[3]),
        ];
        assert_eq!(auto_variant(&signals), ChartVariant::Radar);
    }
}

#[test]
fn test_three_categories_with_three_signals_is_not_radar() {
    let signals = vec![
        signal(SignalCategory::Rsi, SignalStrength::Neutral, 0.5),
        signal(SignalCategory::Macd, SignalStrength::Neutral, 0.5),
        signal(SignalCategory::Stochastic, SignalStrength::Neutral, 0.5),
    ];
    assert_eq!(auto_variant(&signals), ChartVariant::Pie);
}

#[test]
fn test_dispersed_confidence_selects_bar() {
    let signals = vec![
        signal(SignalCategory::Rsi, SignalStrength::Neutral, 0.1),
        signal(SignalCategory::Macd, SignalStrength::Neutral, 0.9),
    ];
    assert_eq!(auto_variant(&signals), ChartVariant::Bar);
}

#[test]
fn test_uniform_confidence_selects_pie() {
    let signals = signals_with_confidences(SignalCategory::MaRibbon, &[0.6, 0.65, 0.7]);
    assert_eq!(auto_variant(&signals), ChartVariant::Pie);
}

#[test]
fn test_forced_variant_overrides_tree() {
    let signals = signals_with_confidences(SignalCategory::Rsi, &[0.5, 0.5]);
    let variant = select_variant(&signals, VariantRequest::Force(ChartVariant::Heatmap));
    assert_eq!(variant, ChartVariant::Heatmap);
}

#[test]
fn test_forced_variant_on_empty_set_is_empty() {
    let variant = select_variant(&[], VariantRequest::Force(ChartVariant::Gauge));
    assert_eq!(variant, ChartVariant::Empty);
}

#[test]
fn test_variant_request_parsing() {
    assert_eq!("".parse::<VariantRequest>(), Ok(VariantRequest::Auto));
    assert_eq!("AUTO".parse::<VariantRequest>(), Ok(VariantRequest::Auto));
    assert_eq!(
        " gauge ".parse::<VariantRequest>(),
        Ok(VariantRequest::Force(ChartVariant::Gauge))
    );
    assert!("treemap".parse::<VariantRequest>().is_err());
}

#[test]
fn test_sections_follow_category_and_signal_counts() {
    let few = signals_with_confidences(SignalCategory::Rsi, &[0.5, 0.5]);
    let sections = chart_sections(&few);
    assert!(!sections.radar && !sections.bar && !sections.heatmap);

    let mut many = signals_with_confidences(SignalCategory::Rsi, &[0.5, 0.5, 0.5]);
    many.push(signal(SignalCategory::Macd, SignalStrength::Bullish, 0.7));
    many.push(signal(SignalCategory::Fibonacci, SignalStrength::Neutral, 0.4));
    let sections = chart_sections(&many);
    assert!(sections.radar && sections.bar && sections.heatmap);
}
