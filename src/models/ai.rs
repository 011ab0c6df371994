//! AI augmentation output, a 1:1 companion of an analysis.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Buy,
    Sell,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingRecommendation {
    pub recommendation: Recommendation,
    pub entry: f64,
    pub stop_loss: f64,
    pub target: f64,
    pub risk_reward_ratio: f64,
    pub confidence: f64,
    pub reasoning: String,
    pub position_size_adjustment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall_risk_level: RiskLevel,
    #[serde(default)]
    pub identified_risks: Vec<String>,
    pub recommended_stop_loss_pct: f64,
    pub position_size_adjustment: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Volatility {
    LowVolatility,
    Normal,
    HighVolatility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityRegime {
    pub regime: Volatility,
    pub hv_30d: String,
    pub atr_pct: String,
    pub recommended_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub entry_trigger: String,
    pub confidence: f64,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: AlertSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AIOutput {
    #[serde(default)]
    pub id: String,
    pub signal_summary: String,
    pub trading_recommendation: TradingRecommendation,
    pub risk_assessment: RiskAssessment,
    pub volatility_regime: VolatilityRegime,
    #[serde(default)]
    pub opportunities: Vec<Opportunity>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
}
