//! Price positioning against the snapshot's simple moving averages

use serde::{Deserialize, Serialize};

use crate::models::indicators::IndicatorSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaPosition {
    AboveAll,
    BelowAll,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaDistance {
    pub period: u32,
    pub label: String,
    pub value: f64,
    /// `(price - ma) / ma * 100`
    pub diff_pct: f64,
    pub above: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaPositioning {
    pub price: f64,
    pub position: MaPosition,
    pub distances: Vec<MaDistance>,
}

pub fn classify_position(price: f64, averages: &[f64]) -> Option<MaPosition> {
    if averages.is_empty() {
        return None;
    }
    if averages.iter().all(|&ma| price > ma) {
        Some(MaPosition::AboveAll)
    } else if averages.iter().all(|&ma| price < ma) {
        Some(MaPosition::BelowAll)
    } else {
        Some(MaPosition::Mixed)
    }
}

/// `None` means "no data": no current price or no `SMA_*` readings.
pub fn ma_positioning(snapshot: &IndicatorSnapshot) -> Option<MaPositioning> {
    let price = snapshot.current_price()?;
    let averages = snapshot.moving_averages();
    let values: Vec<f64> = averages.iter().map(|ma| ma.value).collect();
    let position = classify_position(price, &values)?;

    let distances = averages
        .iter()
        .map(|ma| MaDistance {
            period: ma.period,
            label: ma.label(),
            value: ma.value,
            diff_pct: (price - ma.value) / ma.value * 100.0,
            above: price > ma.value,
        })
        .collect();

    Some(MaPositioning {
        price,
        position,
        distances,
    })
}
