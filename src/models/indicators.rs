use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CURRENT_PRICE: &str = "Current_Price";
pub const VOLUME: &str = "Volume";
pub const MACD: &str = "MACD";
pub const MACD_SIGNAL: &str = "MACD_Signal";

const SMA_PREFIX: &str = "SMA_";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverage {
    pub period: u32,
    pub value: f64,
}

impl MovingAverage {
    pub fn label(&self) -> String {
        format!("SMA {}", self.period)
    }
}

/// Indicator readings for one symbol at one point in time.
///
/// Keys follow the pipeline's naming (`Current_Price`, `MACD_Signal`,
/// `SMA_<period>`, ...). Every accessor is optional: the pipeline output
/// shape is not guaranteed, and a missing reading is "no data", not zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSnapshot {
    values: BTreeMap<String, f64>,
}

impl IndicatorSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn with_sma(self, period: u32, value: f64) -> Self {
        self.with(format!("{}{}", SMA_PREFIX, period), value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn current_price(&self) -> Option<f64> {
        self.get(CURRENT_PRICE)
    }

    pub fn volume(&self) -> Option<f64> {
        self.get(VOLUME)
    }

    pub fn macd(&self) -> Option<f64> {
        self.get(MACD)
    }

    pub fn macd_signal(&self) -> Option<f64> {
        self.get(MACD_SIGNAL)
    }

    pub fn sma(&self, period: u32) -> Option<f64> {
        self.get(&format!("{}{}", SMA_PREFIX, period))
    }

    /// All `SMA_<period>` readings ordered by period.
    ///
    /// Keys whose suffix is not an unsigned integer are skipped.
    pub fn moving_averages(&self) -> Vec<MovingAverage> {
        let mut averages: Vec<MovingAverage> = self
            .values
            .iter()
            .filter_map(|(key, &value)| {
                let period = key.strip_prefix(SMA_PREFIX)?.parse::<u32>().ok()?;
                Some(MovingAverage { period, value })
            })
            .collect();
        averages.sort_by_key(|ma| ma.period);
        averages
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, &v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, f64)> for IndicatorSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
