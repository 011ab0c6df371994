//! Chart series for each signal visualization

use serde::{Deserialize, Serialize};

use crate::models::signal::{Signal, SignalCategory, SignalStrength};
use crate::signals::aggregation::{
    aggregate_by_category, aggregate_sentiment, average_confidence, Sentiment,
};
use crate::signals::categories::{category_label, category_title, ChartPalette, HEATMAP_STRENGTHS};
use crate::signals::selector::ChartVariant;

const BAR_LABEL_MAX_CHARS: usize = 20;

fn pct(fraction: f64) -> u32 {
    (fraction * 100.0).round().max(0.0) as u32
}

fn truncate_label(name: &str, max: usize) -> String {
    if name.chars().count() > max {
        let head: String = name.chars().take(max - 1).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarPoint {
    pub category: SignalCategory,
    pub label: String,
    pub confidence: u32,
    pub strength: u32,
    pub count: usize,
}

pub fn radar_series(signals: &[Signal]) -> Vec<RadarPoint> {
    aggregate_by_category(signals)
        .into_iter()
        .map(|agg| RadarPoint {
            category: agg.category,
            label: category_title(agg.category),
            confidence: pct(agg.mean_confidence),
            strength: pct(agg.mean_strength),
            count: agg.count,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarSort {
    #[default]
    Confidence,
    Value,
    Category,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarEntry {
    pub name: String,
    pub full_name: String,
    pub confidence: u32,
    pub category: SignalCategory,
    pub strength: SignalStrength,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub entries: Vec<BarEntry>,
    pub average_confidence: u32,
}

pub fn bar_series(signals: &[Signal], sort: BarSort) -> BarSeries {
    let mut sorted: Vec<&Signal> = signals.iter().collect();
    match sort {
        BarSort::Confidence => sorted.sort_by(|a, b| b.confidence.total_cmp(&a.confidence)),
        BarSort::Value => sorted.sort_by(|a, b| b.value.total_cmp(&a.value)),
        BarSort::Category => sorted.sort_by(|a, b| a.category.as_str().cmp(b.category.as_str())),
    }

    let entries = sorted
        .into_iter()
        .map(|signal| BarEntry {
            name: truncate_label(&signal.name, BAR_LABEL_MAX_CHARS),
            full_name: signal.name.clone(),
            confidence: pct(signal.confidence),
            category: signal.category,
            strength: signal.strength,
            value: signal.value,
            color: ChartPalette::category(signal.category).to_string(),
        })
        .collect();

    BarSeries {
        entries,
        average_confidence: pct(average_confidence(signals)),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSlice {
    pub category: SignalCategory,
    pub label: String,
    pub count: usize,
    pub share: f64,
    pub color: String,
}

/// Signal count per category, largest slice first
pub fn pie_series(signals: &[Signal]) -> Vec<PieSlice> {
    let total = signals.len() as f64;
    let mut slices: Vec<PieSlice> = aggregate_by_category(signals)
        .into_iter()
        .map(|agg| PieSlice {
            category: agg.category,
            label: category_label(agg.category),
            count: agg.count,
            share: agg.count as f64 / total,
            color: ChartPalette::category(agg.category).to_string(),
        })
        .collect();
    slices.sort_by(|a, b| b.count.cmp(&a.count));
    slices
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeReading {
    pub average_confidence: u32,
    pub sentiment: Sentiment,
    pub color: String,
    pub signal_count: usize,
}

pub fn gauge_reading(signals: &[Signal]) -> GaugeReading {
    let aggregate = aggregate_sentiment(signals);
    GaugeReading {
        average_confidence: pct(aggregate.average_confidence),
        sentiment: aggregate.sentiment,
        color: ChartPalette::sentiment(aggregate.sentiment).to_string(),
        signal_count: aggregate.signal_count,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub strength: SignalStrength,
    pub count: usize,
    pub average_confidence: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    pub category: SignalCategory,
    pub label: String,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapGrid {
    pub strengths: Vec<SignalStrength>,
    pub rows: Vec<HeatmapRow>,
}

pub fn heatmap_grid(signals: &[Signal]) -> HeatmapGrid {
    let mut categories: Vec<SignalCategory> = signals.iter().map(|s| s.category).collect();
    categories.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    categories.dedup();

    let rows = categories
        .into_iter()
        .map(|category| {
            let cells = HEATMAP_STRENGTHS
                .iter()
                .map(|&strength| {
                    let matching: Vec<&Signal> = signals
                        .iter()
                        .filter(|s| s.category == category && s.strength == strength)
                        .collect();
                    let count = matching.len();
                    let average_confidence = if count > 0 {
                        matching.iter().map(|s| s.confidence).sum::<f64>() / count as f64
                    } else {
                        0.0
                    };
                    let color = if count > 0 {
                        ChartPalette::strength(strength)
                    } else {
                        ChartPalette::EMPTY_CELL
                    };
                    HeatmapCell {
                        strength,
                        count,
                        average_confidence,
                        color: color.to_string(),
                    }
                })
                .collect();
            HeatmapRow {
                category,
                label: category_label(category),
                cells,
            }
        })
        .collect();

    HeatmapGrid {
        strengths: HEATMAP_STRENGTHS.to_vec(),
        rows,
    }
}

/// Series for one chart, tagged with its variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", content = "data", rename_all = "snake_case")]
pub enum ChartData {
    Empty,
    Radar(Vec<RadarPoint>),
    Bar(BarSeries),
    Pie(Vec<PieSlice>),
    Gauge(GaugeReading),
    Heatmap(HeatmapGrid),
}

impl ChartData {
    pub fn variant(&self) -> ChartVariant {
        match self {
            ChartData::Empty => ChartVariant::Empty,
            ChartData::Radar(_) => ChartVariant::Radar,
            ChartData::Bar(_) => ChartVariant::Bar,
            ChartData::Pie(_) => ChartVariant::Pie,
            ChartData::Gauge(_) => ChartVariant::Gauge,
            ChartData::Heatmap(_) => ChartVariant::Heatmap,
        }
    }
}

pub fn build_chart(signals: &[Signal], variant: ChartVariant) -> ChartData {
    if signals.is_empty() {
        return ChartData::Empty;
    }
    match variant {
        ChartVariant::Empty => ChartData::Empty,
        ChartVariant::Radar => ChartData::Radar(radar_series(signals)),
        ChartVariant::Bar => ChartData::Bar(bar_series(signals, BarSort::default())),
        ChartVariant::Pie => ChartData::Pie(pie_series(signals)),
        ChartVariant::Gauge => ChartData::Gauge(gauge_reading(signals)),
        ChartVariant::Heatmap => ChartData::Heatmap(heatmap_grid(signals)),
    }
}
