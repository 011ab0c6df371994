//! Shared data models produced by the analysis pipeline.

pub mod ai;
pub mod analysis;
pub mod indicators;
pub mod signal;

pub use ai::{
    AIOutput, Alert, AlertSeverity, Opportunity, Recommendation, RiskAssessment, RiskLevel,
    TradingRecommendation, Volatility, VolatilityRegime,
};
pub use analysis::{Analysis, FullAnalysis, SignalSummary};
pub use indicators::{IndicatorSnapshot, MovingAverage};
pub use signal::{Signal, SignalCategory, SignalStrength};
