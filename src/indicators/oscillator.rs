//! Oscillator zone classification (RSI, Stochastic)

use serde::{Deserialize, Serialize};

use crate::models::signal::Signal;

/// Value used when no signal reports the oscillator
pub const NEUTRAL_MIDPOINT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OscillatorKind {
    Rsi,
    Stochastic,
}

impl OscillatorKind {
    /// Indicator name the pipeline attaches to signals for this oscillator
    pub fn indicator_name(&self) -> &'static str {
        match self {
            OscillatorKind::Rsi => "RSI",
            OscillatorKind::Stochastic => "Stochastic",
        }
    }

    pub fn default_thresholds(&self) -> ZoneThresholds {
        match self {
            OscillatorKind::Rsi => ZoneThresholds::new(70.0, 30.0),
            OscillatorKind::Stochastic => ZoneThresholds::new(80.0, 20.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneThresholds {
    pub high: f64,
    pub low: f64,
}

impl ZoneThresholds {
    pub fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    Overbought,
    Oversold,
    Neutral,
}

pub fn classify_zone(value: f64, thresholds: ZoneThresholds) -> Zone {
    if value >= thresholds.high {
        Zone::Overbought
    } else if value <= thresholds.low {
        Zone::Oversold
    } else {
        Zone::Neutral
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillatorReading {
    pub kind: OscillatorKind,
    pub value: f64,
    pub zone: Zone,
    pub thresholds: ZoneThresholds,
    /// False when no signal carried the value and the midpoint was used
    pub observed: bool,
}

impl OscillatorReading {
    pub fn is_defaulted(&self) -> bool {
        !self.observed
    }
}

fn find_value(signals: &[Signal], kind: OscillatorKind) -> Option<f64> {
    signals
        .iter()
        .find(|s| {
            s.indicator_name
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(kind.indicator_name()))
        })
        .map(|s| s.value)
}

pub fn oscillator_reading_with(
    signals: &[Signal],
    kind: OscillatorKind,
    thresholds: ZoneThresholds,
) -> OscillatorReading {
    let observed = find_value(signals, kind);
    let value = observed.unwrap_or(NEUTRAL_MIDPOINT);
    OscillatorReading {
        kind,
        value,
        zone: classify_zone(value, thresholds),
        thresholds,
        observed: observed.is_some(),
    }
}

pub fn oscillator_reading(signals: &[Signal], kind: OscillatorKind) -> OscillatorReading {
    oscillator_reading_with(signals, kind, kind.default_thresholds())
}
