//! Category and strength palettes

use crate::models::signal::{SignalCategory, SignalStrength};
use crate::signals::aggregation::Sentiment;

pub struct ChartPalette;

impl ChartPalette {
    pub const BULLISH: &'static str = "#22c55e";
    pub const BEARISH: &'static str = "#ef4444";
    pub const NEUTRAL: &'static str = "#71717a";
    /// Background of an empty heatmap cell
    pub const EMPTY_CELL: &'static str = "#f4f4f5";

    pub fn category(category: SignalCategory) -> &'static str {
        match category {
            SignalCategory::Fibonacci => "#8b5cf6",
            SignalCategory::Macd => "#06b6d4",
            SignalCategory::Rsi => "#f59e0b",
            SignalCategory::Stochastic => "#ec4899",
            SignalCategory::MaRibbon => "#3b82f6",
            SignalCategory::MaPosition => "#10b981",
        }
    }

    pub fn strength(strength: SignalStrength) -> &'static str {
        match strength {
            SignalStrength::Bullish => "#22c55e",
            SignalStrength::Strong => "#16a34a",
            SignalStrength::Bearish => "#ef4444",
            SignalStrength::Weak => "#9ca3af",
            SignalStrength::Moderate => "#f59e0b",
            SignalStrength::Neutral => "#71717a",
        }
    }

    pub fn sentiment(sentiment: Sentiment) -> &'static str {
        match sentiment {
            Sentiment::Bullish => Self::BULLISH,
            Sentiment::Bearish => Self::BEARISH,
            Sentiment::Neutral => Self::NEUTRAL,
        }
    }
}

/// Human-readable category name, e.g. `MA RIBBON`
pub fn category_label(category: SignalCategory) -> String {
    category.as_str().replace('_', " ")
}

/// Title-cased category name used on radar axes, e.g. `Ma Ribbon`
pub fn category_title(category: SignalCategory) -> String {
    category
        .as_str()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numeric weight of a strength on a 0..1 scale
pub fn strength_weight(strength: SignalStrength) -> f64 {
    match strength {
        SignalStrength::Strong => 1.0,
        SignalStrength::Bullish => 0.8,
        SignalStrength::Moderate => 0.6,
        SignalStrength::Neutral => 0.5,
        SignalStrength::Weak => 0.3,
        SignalStrength::Bearish => 0.2,
    }
}

/// Row order of the strength heatmap
pub const HEATMAP_STRENGTHS: [SignalStrength; 6] = [
    SignalStrength::Strong,
    SignalStrength::Bullish,
    SignalStrength::Moderate,
    SignalStrength::Neutral,
    SignalStrength::Weak,
    SignalStrength::Bearish,
];
