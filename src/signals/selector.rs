//! Chart-variant selection for a signal set

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::signal::Signal;
use crate::signals::aggregation::{distinct_categories, population_std_dev};

/// Distinct categories needed before the radar view is chosen
pub const RADAR_MIN_CATEGORIES: usize = 3;
/// Signals needed before the radar view is chosen
pub const RADAR_MIN_SIGNALS: usize = 4;
/// Confidence standard deviation above which the ranked bar view is chosen
pub const CONFIDENCE_DISPERSION_THRESHOLD: f64 = 0.15;

/// Signals needed before the dashboard shows the bar section
pub const BAR_SECTION_MIN_SIGNALS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartVariant {
    Empty,
    Radar,
    Bar,
    Pie,
    Gauge,
    Heatmap,
}

impl ChartVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartVariant::Empty => "empty",
            ChartVariant::Radar => "radar",
            ChartVariant::Bar => "bar",
            ChartVariant::Pie => "pie",
            ChartVariant::Gauge => "gauge",
            ChartVariant::Heatmap => "heatmap",
        }
    }
}

impl fmt::Display for ChartVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested presentation: let the selector decide, or force a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantRequest {
    #[default]
    Auto,
    Force(ChartVariant),
}

impl FromStr for VariantRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(VariantRequest::Auto),
            "radar" => Ok(VariantRequest::Force(ChartVariant::Radar)),
            "bar" => Ok(VariantRequest::Force(ChartVariant::Bar)),
            "pie" => Ok(VariantRequest::Force(ChartVariant::Pie)),
            "gauge" => Ok(VariantRequest::Force(ChartVariant::Gauge)),
            "heatmap" => Ok(VariantRequest::Force(ChartVariant::Heatmap)),
            other => Err(format!("unknown chart variant: {}", other)),
        }
    }
}

/// Decision tree over the signal set, first match wins:
/// empty, radar (≥3 categories and ≥4 signals), bar (confidence
/// stddev > 0.15), otherwise pie.
pub fn auto_variant(signals: &[Signal]) -> ChartVariant {
    if signals.is_empty() {
        return ChartVariant::Empty;
    }

    if distinct_categories(signals) >= RADAR_MIN_CATEGORIES && signals.len() >= RADAR_MIN_SIGNALS {
        return ChartVariant::Radar;
    }

    let confidences: Vec<f64> = signals.iter().map(|s| s.confidence).collect();
    if population_std_dev(&confidences) > CONFIDENCE_DISPERSION_THRESHOLD {
        return ChartVariant::Bar;
    }

    ChartVariant::Pie
}

/// A forced variant skips the decision tree; an empty set still renders
/// the placeholder since there is nothing to draw.
pub fn select_variant(signals: &[Signal], request: VariantRequest) -> ChartVariant {
    match request {
        VariantRequest::Auto => auto_variant(signals),
        VariantRequest::Force(_) if signals.is_empty() => ChartVariant::Empty,
        VariantRequest::Force(variant) => variant,
    }
}

/// Which chart sections the analysis page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSections {
    pub radar: bool,
    pub bar: bool,
    pub heatmap: bool,
}

pub fn chart_sections(signals: &[Signal]) -> ChartSections {
    let many_categories = distinct_categories(signals) >= RADAR_MIN_CATEGORIES;
    let many_signals = signals.len() >= BAR_SECTION_MIN_SIGNALS;
    ChartSections {
        radar: many_categories,
        bar: many_signals,
        heatmap: many_categories && many_signals,
    }
}
