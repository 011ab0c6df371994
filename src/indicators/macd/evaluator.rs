use crate::indicators::macd::evaluation::{MacdCrossover, MomentumStrength};
use crate::models::indicators::IndicatorSnapshot;

const STRONG_RATIO: f64 = 0.7;
const MODERATE_RATIO: f64 = 0.3;

/// Grade a histogram against the magnitude range of a comparison series.
///
/// A non-positive range carries no scale information and grades as weak.
pub fn classify_strength(histogram: f64, range: f64) -> MomentumStrength {
    if !(range > 0.0) {
        return MomentumStrength::Weak;
    }
    let magnitude = histogram.abs();
    if magnitude > range * STRONG_RATIO {
        MomentumStrength::Strong
    } else if magnitude > range * MODERATE_RATIO {
        MomentumStrength::Moderate
    } else {
        MomentumStrength::Weak
    }
}

/// Largest absolute value in the series, 0 when empty
pub fn histogram_range(series: &[f64]) -> f64 {
    series
        .iter()
        .map(|v| v.abs())
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}

pub fn detect_crossover(macd: f64, signal: f64, range: f64) -> MacdCrossover {
    let histogram = macd - signal;
    MacdCrossover::new(macd, signal, histogram, classify_strength(histogram, range), range)
}

/// Crossover state from a snapshot; `None` when either line is missing
pub fn crossover_from_snapshot(snapshot: &IndicatorSnapshot, range: f64) -> Option<MacdCrossover> {
    let macd = snapshot.macd()?;
    let signal = snapshot.macd_signal()?;
    Some(detect_crossover(macd, signal, range))
}

/// Crossover graded against the snapshot's own magnitudes
///
/// Without a history series, the comparison series is MACD, its signal
/// line and the histogram.
pub fn snapshot_crossover(snapshot: &IndicatorSnapshot) -> Option<MacdCrossover> {
    let macd = snapshot.macd()?;
    let signal = snapshot.macd_signal()?;
    let range = histogram_range(&[macd, signal, macd - signal]);
    Some(detect_crossover(macd, signal, range))
}
