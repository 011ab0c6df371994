use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ai::AIOutput;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::signal::Signal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub total: u32,
    pub bullish: u32,
    pub bearish: u32,
    pub neutral: u32,
}

/// One pipeline run for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub id: String,
    pub symbol: String,
    pub interval: String,
    pub timestamp: DateTime<Utc>,
    pub bars_analyzed: u32,
    pub indicators: IndicatorSnapshot,
    pub signal_summary: SignalSummary,
    #[serde(default)]
    pub ai_enabled: bool,
}

impl Analysis {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        timestamp: DateTime<Utc>,
        indicators: IndicatorSnapshot,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            interval: "1d".to_string(),
            timestamp,
            bars_analyzed: 0,
            indicators,
            signal_summary: SignalSummary::default(),
            ai_enabled: false,
        }
    }

    pub fn with_summary(mut self, summary: SignalSummary) -> Self {
        self.signal_summary = summary;
        self
    }

    pub fn with_bars(mut self, interval: impl Into<String>, bars_analyzed: u32) -> Self {
        self.interval = interval.into();
        self.bars_analyzed = bars_analyzed;
        self
    }
}

/// An analysis with its signals and optional AI companion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullAnalysis {
    pub analysis: Analysis,
    pub signals: Vec<Signal>,
    pub ai_output: Option<AIOutput>,
}
