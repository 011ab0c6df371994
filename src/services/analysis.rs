//! Analysis read service
//!
//! Fetches the records one dashboard page needs. Independent reads for the
//! same analysis run concurrently.

use std::sync::Arc;
use tracing::debug;

use crate::db::AnalysisStore;
use crate::error::Result;
use crate::models::{Analysis, FullAnalysis, Signal};
use crate::views::{dashboard_view, distinct_symbols, DashboardView};

/// Bullish signals listed on the dashboard
pub const DASHBOARD_BULLISH_LIMIT: usize = 10;

#[derive(Clone)]
pub struct AnalysisService {
    store: Arc<dyn AnalysisStore>,
}

impl AnalysisService {
    pub fn new(store: Arc<dyn AnalysisStore>) -> Self {
        Self { store }
    }

    /// Latest analysis for the symbol with its signals and AI output,
    /// `None` when the symbol has never been analysed.
    pub async fn full_analysis(&self, symbol: &str) -> Result<Option<FullAnalysis>> {
        let Some(analysis) = self.store.latest_by_symbol(symbol).await? else {
            debug!(symbol = %symbol, "No analysis found");
            return Ok(None);
        };

        let (signals, ai_output) = tokio::try_join!(
            self.store.signals_by_analysis_id(&analysis.id),
            self.store.ai_output_by_analysis_id(&analysis.id),
        )?;

        debug!(
            symbol = %symbol,
            analysis_id = %analysis.id,
            signals = signals.len(),
            ai = ai_output.is_some(),
            "Loaded full analysis"
        );

        Ok(Some(FullAnalysis {
            analysis,
            signals,
            ai_output,
        }))
    }

    pub async fn dashboard(&self) -> Result<DashboardView> {
        let (analyses, bullish): (Vec<Analysis>, Vec<Signal>) = tokio::try_join!(
            self.store.list_analyses(),
            self.store.bullish_signals(DASHBOARD_BULLISH_LIMIT),
        )?;
        Ok(dashboard_view(&analyses, bullish))
    }

    pub async fn symbols(&self) -> Result<Vec<String>> {
        let analyses = self.store.list_analyses().await?;
        Ok(distinct_symbols(&analyses))
    }
}
