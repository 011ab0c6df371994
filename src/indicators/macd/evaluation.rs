use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrossoverType {
    Bullish,
    Bearish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MomentumStrength {
    Strong,
    Moderate,
    Weak,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdCrossover {
    pub crossover_type: CrossoverType,
    pub bullish: bool,
    pub macd_value: f64,
    pub signal_value: f64,
    pub histogram: f64,
    pub strength: MomentumStrength,
    /// Magnitude range the histogram was graded against
    pub range: f64,
}

impl MacdCrossover {
    pub fn new(
        macd_value: f64,
        signal_value: f64,
        histogram: f64,
        strength: MomentumStrength,
        range: f64,
    ) -> Self {
        let bullish = macd_value > signal_value;
        Self {
            crossover_type: if bullish {
                CrossoverType::Bullish
            } else {
                CrossoverType::Bearish
            },
            bullish,
            macd_value,
            signal_value,
            histogram,
            strength,
            range,
        }
    }
}
