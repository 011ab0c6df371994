use crate::error::Result;
use crate::models::{AIOutput, Analysis, Signal, SignalCategory};

/// Read contract over analyses, signals and AI outputs.
///
/// `Ok(None)` means the record does not exist. A record that exists but
/// cannot be decoded is `DashboardError::MalformedRecord`.
#[async_trait::async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Most recent analysis for a symbol (symbol is matched uppercased)
    async fn latest_by_symbol(&self, symbol: &str) -> Result<Option<Analysis>>;

    async fn analysis_by_id(&self, id: &str) -> Result<Option<Analysis>>;

    /// All analyses, newest first
    async fn list_analyses(&self) -> Result<Vec<Analysis>>;

    async fn signals_by_analysis_id(&self, analysis_id: &str) -> Result<Vec<Signal>>;

    async fn signals_by_symbol(&self, symbol: &str) -> Result<Vec<Signal>>;

    async fn signals_by_category(&self, category: SignalCategory) -> Result<Vec<Signal>>;

    /// BULLISH signals, highest confidence first
    async fn bullish_signals(&self, limit: usize) -> Result<Vec<Signal>>;

    async fn ai_output_by_analysis_id(&self, analysis_id: &str) -> Result<Option<AIOutput>>;
}
