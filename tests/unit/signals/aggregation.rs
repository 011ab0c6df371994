//! Unit tests for sentiment and category aggregation

use signalscope::models::{SignalCategory, SignalStrength};
use signalscope::signals::{
    aggregate_by_category, aggregate_sentiment, average_confidence, group_signals,
    population_std_dev, Sentiment,
};

use crate::common_fixtures::signal;

#[test]
fn test_strong_weak_neutral_is_a_tie() {
    let signals = vec![
        signal(SignalCategory::Rsi, SignalStrength::Strong, 0.9),
        signal(SignalCategory::Macd, SignalStrength::Weak, 0.3),
        signal(SignalCategory::Stochastic, SignalStrength::Neutral, 0.6),
    ];
    let aggregate = aggregate_sentiment(&signals);

    assert_eq!(aggregate.bullish_count, 1);
    assert_eq!(aggregate.bearish_count, 1);
    assert_eq!(aggregate.sentiment, Sentiment::Neutral);
    assert!((aggregate.average_confidence - 0.6).abs() < 1e-9);
}

#[test]
fn test_bullish_majority() {
    let signals = vec![
        signal(SignalCategory::Macd, SignalStrength::Bullish, 0.8),
        signal(SignalCategory::MaRibbon, SignalStrength::Bullish, 0.7),
        signal(SignalCategory::Rsi, SignalStrength::Bearish, 0.6),
    ];
    assert_eq!(aggregate_sentiment(&signals).sentiment, Sentiment::Bullish);
}

#[test]
fn test_moderate_counts_toward_neither_side() {
    let signals = vec![
        signal(SignalCategory::Rsi, SignalStrength::Moderate, 0.5),
        signal(SignalCategory::Rsi, SignalStrength::Bearish, 0.5),
    ];
    let aggregate = aggregate_sentiment(&signals);
    assert_eq!(aggregate.bullish_count, 0);
    assert_eq!(aggregate.sentiment, Sentiment::Bearish);
}

#[test]
fn test_empty_sequence_is_neutral_with_zero_confidence() {
    let aggregate = aggregate_sentiment(&[]);
    assert_eq!(aggregate.signal_count, 0);
    assert_eq!(aggregate.average_confidence, 0.0);
    assert_eq!(aggregate.sentiment, Sentiment::Neutral);
    assert_eq!(average_confidence(&[]), 0.0);
}

#[test]
fn test_population_std_dev() {
    assert!((population_std_dev(&[0.1, 0.9]) - 0.4).abs() < 1e-9);
    assert_eq!(population_std_dev(&[0.5]), 0.0);
    assert_eq!(population_std_dev(&[0.5, 0.5, 0.5]), 0.0);
}

#[test]
fn test_category_aggregates_are_means() {
    let signals = vec![
        signal(SignalCategory::Macd, SignalStrength::Strong, 0.9),
        signal(SignalCategory::Macd, SignalStrength::Weak, 0.5),
        signal(SignalCategory::Rsi, SignalStrength::Neutral, 0.4),
    ];
    let aggregates = aggregate_by_category(&signals);
    assert_eq!(aggregates.len(), 2);

    let macd = aggregates
        .iter()
        .find(|a| a.category == SignalCategory::Macd)
        .unwrap();
    assert_eq!(macd.count, 2);
    assert!((macd.mean_confidence - 0.7).abs() < 1e-9);
    assert!((macd.mean_strength - 0.65).abs() < 1e-9);
}

#[test]
fn test_group_signals_by_panel() {
    let signals = vec![
        signal(SignalCategory::Rsi, SignalStrength::Neutral, 0.5),
        signal(SignalCategory::MaRibbon, SignalStrength::Bullish, 0.5),
        signal(SignalCategory::MaPosition, SignalStrength::Bullish, 0.5),
        signal(SignalCategory::Fibonacci, SignalStrength::Neutral, 0.5),
    ];
    let groups = group_signals(&signals);
    assert_eq!(groups.rsi.len(), 1);
    assert_eq!(groups.moving_average.len(), 2);
    assert!(groups.macd.is_empty());
    assert!(groups.stochastic.is_empty());
}
