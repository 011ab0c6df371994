//! In-process store used by tests and local demos

use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::db::store::AnalysisStore;
use crate::error::Result;
use crate::models::{AIOutput, Analysis, Signal, SignalCategory, SignalStrength};

#[derive(Default)]
pub struct InMemoryStore {
    analyses: RwLock<Vec<Analysis>>,
    signals: RwLock<Vec<Signal>>,
    ai_outputs: RwLock<HashMap<String, AIOutput>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_analysis(&self, analysis: Analysis) {
        let mut analyses = self.analyses.write().await;
        analyses.retain(|a| a.id != analysis.id);
        analyses.push(analysis);
    }

    pub async fn insert_signals(&self, signals: impl IntoIterator<Item = Signal>) {
        self.signals.write().await.extend(signals);
    }

    pub async fn insert_ai_output(&self, analysis_id: impl Into<String>, output: AIOutput) {
        self.ai_outputs.write().await.insert(analysis_id.into(), output);
    }
}

#[async_trait::async_trait]
impl AnalysisStore for InMemoryStore {
    async fn latest_by_symbol(&self, symbol: &str) -> Result<Option<Analysis>> {
        let symbol = symbol.trim().to_uppercase();
        let analyses = self.analyses.read().await;
        Ok(analyses
            .iter()
            .filter(|a| a.symbol == symbol)
            .max_by_key(|a| a.timestamp)
            .cloned())
    }

    async fn analysis_by_id(&self, id: &str) -> Result<Option<Analysis>> {
        let analyses = self.analyses.read().await;
        Ok(analyses.iter().find(|a| a.id == id).cloned())
    }

    async fn list_analyses(&self) -> Result<Vec<Analysis>> {
        let mut analyses = self.analyses.read().await.clone();
        analyses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(analyses)
    }

    async fn signals_by_analysis_id(&self, analysis_id: &str) -> Result<Vec<Signal>> {
        let signals = self.signals.read().await;
        Ok(signals
            .iter()
            .filter(|s| s.analysis_id == analysis_id)
            .cloned()
            .collect())
    }

    async fn signals_by_symbol(&self, symbol: &str) -> Result<Vec<Signal>> {
        let symbol = symbol.trim().to_uppercase();
        let signals = self.signals.read().await;
        Ok(signals.iter().filter(|s| s.symbol == symbol).cloned().collect())
    }

    async fn signals_by_category(&self, category: SignalCategory) -> Result<Vec<Signal>> {
        let signals = self.signals.read().await;
        Ok(signals
            .iter()
            .filter(|s| s.category == category)
            .cloned()
            .collect())
    }

    async fn bullish_signals(&self, limit: usize) -> Result<Vec<Signal>> {
        let signals = self.signals.read().await;
        let mut bullish: Vec<Signal> = signals
            .iter()
            .filter(|s| s.strength == SignalStrength::Bullish)
            .cloned()
            .collect();
        bullish.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        bullish.truncate(limit);
        Ok(bullish)
    }

    async fn ai_output_by_analysis_id(&self, analysis_id: &str) -> Result<Option<AIOutput>> {
        Ok(self.ai_outputs.read().await.get(analysis_id).cloned())
    }
}
