use serde::{Deserialize, Serialize};
use std::fmt;

/// Signal category
///
/// Closed set: documents carrying any other category fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalCategory {
    Fibonacci,
    MaRibbon,
    MaPosition,
    Rsi,
    Stochastic,
    Macd,
}

impl SignalCategory {
    pub const ALL: [SignalCategory; 6] = [
        SignalCategory::Fibonacci,
        SignalCategory::MaRibbon,
        SignalCategory::MaPosition,
        SignalCategory::Rsi,
        SignalCategory::Stochastic,
        SignalCategory::Macd,
    ];

    /// Wire name, e.g. `MA_RIBBON`
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalCategory::Fibonacci => "FIBONACCI",
            SignalCategory::MaRibbon => "MA_RIBBON",
            SignalCategory::MaPosition => "MA_POSITION",
            SignalCategory::Rsi => "RSI",
            SignalCategory::Stochastic => "STOCHASTIC",
            SignalCategory::Macd => "MACD",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for SignalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStrength {
    Weak,
    Moderate,
    Strong,
    Neutral,
    Bullish,
    Bearish,
}

impl SignalStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStrength::Weak => "WEAK",
            SignalStrength::Moderate => "MODERATE",
            SignalStrength::Strong => "STRONG",
            SignalStrength::Neutral => "NEUTRAL",
            SignalStrength::Bullish => "BULLISH",
            SignalStrength::Bearish => "BEARISH",
        }
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified observation emitted by the pipeline for an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(default)]
    pub id: String,
    pub analysis_id: String,
    pub symbol: String,
    pub name: String,
    pub category: SignalCategory,
    pub strength: SignalStrength,
    pub confidence: f64,
    pub description: String,
    #[serde(default)]
    pub trading_implication: Option<String>,
    pub value: f64,
    #[serde(default)]
    pub indicator_name: Option<String>,
}

impl Signal {
    pub fn new(
        name: impl Into<String>,
        category: SignalCategory,
        strength: SignalStrength,
        confidence: f64,
    ) -> Self {
        let name = name.into();
        Self {
            id: String::new(),
            analysis_id: String::new(),
            symbol: String::new(),
            description: name.clone(),
            name,
            category,
            strength,
            confidence,
            trading_implication: None,
            value: 0.0,
            indicator_name: None,
        }
    }

    pub fn with_ids(mut self, id: impl Into<String>, analysis_id: impl Into<String>) -> Self {
        self.id = id.into();
        self.analysis_id = analysis_id.into();
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_indicator(mut self, indicator_name: impl Into<String>) -> Self {
        self.indicator_name = Some(indicator_name.into());
        self
    }

    pub fn with_implication(mut self, implication: impl Into<String>) -> Self {
        self.trading_implication = Some(implication.into());
        self
    }
}
