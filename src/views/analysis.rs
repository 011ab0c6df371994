use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::indicators::{
    fibonacci_signals, ma_positioning, oscillator_reading, snapshot_crossover, snapshot_fibonacci,
    FibonacciView, MaPositioning, MacdCrossover, OscillatorKind, OscillatorReading,
};
use crate::models::{
    AIOutput, Analysis, FullAnalysis, IndicatorSnapshot, MovingAverage, Signal, SignalSummary,
};
use crate::signals::{
    aggregate_sentiment, build_chart, chart_sections, group_signals, select_variant, ChartData,
    ChartSections, ChartVariant, SentimentAggregate, SignalGroups, VariantRequest,
};

/// Moving averages that get their own indicator card
const CARD_SMA_PERIODS: [u32; 3] = [20, 50, 200];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorCard {
    pub label: String,
    pub value: f64,
    pub highlight: bool,
    pub trend: Option<Trend>,
}

impl IndicatorCard {
    fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            highlight: false,
            trend: None,
        }
    }

    fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisHeader {
    pub symbol: String,
    pub interval: String,
    pub timestamp: DateTime<Utc>,
    pub bars_analyzed: u32,
    pub summary: SignalSummary,
    pub ai_enabled: bool,
}

impl From<&Analysis> for AnalysisHeader {
    fn from(analysis: &Analysis) -> Self {
        Self {
            symbol: analysis.symbol.clone(),
            interval: analysis.interval.clone(),
            timestamp: analysis.timestamp,
            bars_analyzed: analysis.bars_analyzed,
            summary: analysis.signal_summary,
            ai_enabled: analysis.ai_enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    pub variant: ChartVariant,
    pub chart: ChartData,
}

/// Everything the analysis page renders for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisView {
    pub header: AnalysisHeader,
    pub indicators: IndicatorSnapshot,
    pub cards: Vec<IndicatorCard>,
    pub moving_averages: Option<MaPositioning>,
    pub macd: Option<MacdCrossover>,
    pub rsi: OscillatorReading,
    pub stochastic: OscillatorReading,
    pub fibonacci: Option<FibonacciView>,
    pub fibonacci_signals: Vec<Signal>,
    pub signal_groups: SignalGroups,
    pub sentiment: SentimentAggregate,
    pub chart: ChartView,
    pub sections: ChartSections,
    pub signals: Vec<Signal>,
    pub ai_output: Option<AIOutput>,
}

/// Cards shown above the charts, in display order. Missing readings are skipped.
pub fn indicator_cards(snapshot: &IndicatorSnapshot) -> Vec<IndicatorCard> {
    let mut cards = Vec::new();
    if let Some(price) = snapshot.current_price() {
        cards.push(IndicatorCard::new("Price", price).highlighted());
    }
    if let Some(volume) = snapshot.volume() {
        cards.push(IndicatorCard::new("Volume", volume));
    }
    if let Some(macd) = snapshot.macd() {
        let trend = snapshot.macd_signal().map(|signal| {
            if macd > signal {
                Trend::Up
            } else {
                Trend::Down
            }
        });
        cards.push(IndicatorCard {
            trend,
            ..IndicatorCard::new("MACD", macd)
        });
    }
    for period in CARD_SMA_PERIODS {
        if let Some(value) = snapshot.sma(period) {
            let average = MovingAverage { period, value };
            cards.push(IndicatorCard::new(average.label(), value));
        }
    }
    cards
}

pub fn chart_view(signals: &[Signal], request: VariantRequest) -> ChartView {
    let variant = select_variant(signals, request);
    ChartView {
        variant,
        chart: build_chart(signals, variant),
    }
}

pub fn analysis_view(full: FullAnalysis) -> AnalysisView {
    let FullAnalysis {
        analysis,
        signals,
        ai_output,
    } = full;
    let snapshot = &analysis.indicators;

    AnalysisView {
        header: AnalysisHeader::from(&analysis),
        cards: indicator_cards(snapshot),
        moving_averages: ma_positioning(snapshot),
        macd: snapshot_crossover(snapshot),
        rsi: oscillator_reading(&signals, OscillatorKind::Rsi),
        stochastic: oscillator_reading(&signals, OscillatorKind::Stochastic),
        fibonacci: snapshot_fibonacci(snapshot),
        fibonacci_signals: fibonacci_signals(&signals),
        signal_groups: group_signals(&signals),
        sentiment: aggregate_sentiment(&signals),
        chart: chart_view(&signals, VariantRequest::Auto),
        sections: chart_sections(&signals),
        indicators: analysis.indicators.clone(),
        signals,
        ai_output,
    }
}
