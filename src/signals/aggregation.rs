//! Sentiment and per-category aggregation over a signal sequence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::signal::{Signal, SignalCategory, SignalStrength};
use crate::signals::categories::strength_weight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAggregate {
    pub signal_count: usize,
    /// 0.0 for an empty sequence
    pub average_confidence: f64,
    pub bullish_count: usize,
    pub bearish_count: usize,
    pub sentiment: Sentiment,
}

/// STRONG leans bullish alongside BULLISH.
pub fn is_bullish_lean(strength: SignalStrength) -> bool {
    matches!(strength, SignalStrength::Bullish | SignalStrength::Strong)
}

/// WEAK leans bearish alongside BEARISH.
pub fn is_bearish_lean(strength: SignalStrength) -> bool {
    matches!(strength, SignalStrength::Bearish | SignalStrength::Weak)
}

pub fn average_confidence(signals: &[Signal]) -> f64 {
    if signals.is_empty() {
        return 0.0;
    }
    signals.iter().map(|s| s.confidence).sum::<f64>() / signals.len() as f64
}

pub fn aggregate_sentiment(signals: &[Signal]) -> SentimentAggregate {
    let bullish_count = signals.iter().filter(|s| is_bullish_lean(s.strength)).count();
    let bearish_count = signals.iter().filter(|s| is_bearish_lean(s.strength)).count();

    let sentiment = if bullish_count > bearish_count {
        Sentiment::Bullish
    } else if bearish_count > bullish_count {
        Sentiment::Bearish
    } else {
        Sentiment::Neutral
    };

    SentimentAggregate {
        signal_count: signals.len(),
        average_confidence: average_confidence(signals),
        bullish_count,
        bearish_count,
        sentiment,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub category: SignalCategory,
    pub count: usize,
    pub mean_confidence: f64,
    pub mean_strength: f64,
}

/// Aggregate signals per category, ordered by category
pub fn aggregate_by_category(signals: &[Signal]) -> Vec<CategoryAggregate> {
    let mut totals: BTreeMap<SignalCategory, (f64, f64, usize)> = BTreeMap::new();

    for signal in signals {
        let entry = totals.entry(signal.category).or_insert((0.0, 0.0, 0));
        entry.0 += signal.confidence;
        entry.1 += strength_weight(signal.strength);
        entry.2 += 1;
    }

    totals
        .into_iter()
        .map(|(category, (confidence, strength, count))| CategoryAggregate {
            category,
            count,
            mean_confidence: confidence / count as f64,
            mean_strength: strength / count as f64,
        })
        .collect()
}

pub fn distinct_categories(signals: &[Signal]) -> usize {
    let mut categories: Vec<SignalCategory> = signals.iter().map(|s| s.category).collect();
    categories.sort();
    categories.dedup();
    categories.len()
}

/// Population standard deviation (divides by N); 0 for fewer than two values
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalGroups {
    pub rsi: Vec<Signal>,
    pub stochastic: Vec<Signal>,
    pub moving_average: Vec<Signal>,
    pub macd: Vec<Signal>,
}

/// Split signals into the groups shown next to each indicator panel
pub fn group_signals(signals: &[Signal]) -> SignalGroups {
    let mut groups = SignalGroups::default();
    for signal in signals {
        match signal.category {
            SignalCategory::Rsi => groups.rsi.push(signal.clone()),
            SignalCategory::Stochastic => groups.stochastic.push(signal.clone()),
            SignalCategory::MaPosition | SignalCategory::MaRibbon => {
                groups.moving_average.push(signal.clone())
            }
            SignalCategory::Macd => groups.macd.push(signal.clone()),
            SignalCategory::Fibonacci => {}
        }
    }
    groups
}
