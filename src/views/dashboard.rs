use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Analysis, Signal, SignalSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisListItem {
    pub id: String,
    pub symbol: String,
    pub interval: String,
    pub timestamp: DateTime<Utc>,
    pub current_price: Option<f64>,
    pub summary: SignalSummary,
    pub ai_enabled: bool,
}

impl From<&Analysis> for AnalysisListItem {
    fn from(analysis: &Analysis) -> Self {
        Self {
            id: analysis.id.clone(),
            symbol: analysis.symbol.clone(),
            interval: analysis.interval.clone(),
            timestamp: analysis.timestamp,
            current_price: analysis.indicators.current_price(),
            summary: analysis.signal_summary,
            ai_enabled: analysis.ai_enabled,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub analyses: Vec<AnalysisListItem>,
    pub symbols: Vec<String>,
    pub bullish_signals: Vec<Signal>,
}

/// Distinct symbols, keeping first-seen order
pub fn distinct_symbols(analyses: &[Analysis]) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for analysis in analyses {
        if !symbols.contains(&analysis.symbol) {
            symbols.push(analysis.symbol.clone());
        }
    }
    symbols
}

/// `analyses` are expected newest first, as the store returns them
pub fn dashboard_view(analyses: &[Analysis], bullish_signals: Vec<Signal>) -> DashboardView {
    DashboardView {
        analyses: analyses.iter().map(AnalysisListItem::from).collect(),
        symbols: distinct_symbols(analyses),
        bullish_signals,
    }
}
