//! Unit tests for analysis and dashboard view assembly

use signalscope::indicators::{MaPosition, Zone};
use signalscope::models::{FullAnalysis, SignalCategory, SignalStrength};
use signalscope::signals::{ChartVariant, Sentiment, VariantRequest};
use signalscope::views::{analysis_view, chart_view, dashboard_view, indicator_cards, Trend};

use crate::common_fixtures::{analysis, signal, snapshot};

fn full_analysis() -> FullAnalysis {
    let indicators = snapshot(187.5, &[(20, 180.0), (50, 175.0), (200, 160.0)])
        .with("MACD", 1.2)
        .with("MACD_Signal", 0.8);
    let signals = vec![
        signal(SignalCategory::Rsi, SignalStrength::Neutral, 0.6)
            .with_indicator("RSI")
            .with_value(58.0),
        signal(SignalCategory::Macd, SignalStrength::Bullish, 0.8),
        signal(SignalCategory::MaRibbon, SignalStrength::Bullish, 0.75),
        signal(SignalCategory::Fibonacci, SignalStrength::Neutral, 0.5),
    ];
    FullAnalysis {
        analysis: analysis("a-1", "AAPL", 4, indicators),
        signals,
        ai_output: None,
    }
}

#[test]
fn test_analysis_view_combines_every_panel() {
    let view = analysis_view(full_analysis());

    assert_eq!(view.header.symbol, "AAPL");
    assert_eq!(view.moving_averages.unwrap().position, MaPosition::AboveAll);
    assert!(view.macd.unwrap().bullish);
    assert_eq!(view.rsi.value, 58.0);
    assert_eq!(view.rsi.zone, Zone::Neutral);
    assert!(view.stochastic.is_defaulted());
    assert!(view.fibonacci.is_some());
    assert_eq!(view.fibonacci_signals.len(), 1);
    assert_eq!(view.sentiment.sentiment, Sentiment::Bullish);
    assert_eq!(view.chart.variant, ChartVariant::Radar);
    assert!(view.sections.radar);
    assert_eq!(view.signals.len(), 4);
}

#[test]
fn test_analysis_without_signals_has_empty_chart() {
    let mut full = full_analysis();
    full.signals.clear();
    let view = analysis_view(full);

    assert_eq!(view.chart.variant, ChartVariant::Empty);
    assert_eq!(view.sentiment.average_confidence, 0.0);
    assert!(view.rsi.is_defaulted());
}

#[test]
fn test_chart_view_honours_forced_variant() {
    let full = full_analysis();
    let view = chart_view(&full.signals, VariantRequest::Force(ChartVariant::Pie));
    assert_eq!(view.variant, ChartVariant::Pie);
    assert_eq!(view.chart.variant(), ChartVariant::Pie);
}

#[test]
fn test_indicator_cards() {
    let indicators = full_analysis().analysis.indicators.with("Volume", 52_300_000.0);
    let cards = indicator_cards(&indicators);

    let labels: Vec<&str> = cards.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Price", "Volume", "MACD", "SMA 20", "SMA 50", "SMA 200"]);
    assert!(cards[0].highlight);
    assert!(cards[1..].iter().all(|c| !c.highlight));
    assert_eq!(cards[1].value, 52_300_000.0);
    assert_eq!(cards[2].trend, Some(Trend::Up));
    assert_eq!(cards[5].value, 160.0);
}

#[test]
fn test_indicator_cards_skip_missing_readings() {
    let cards = indicator_cards(&snapshot(187.5, &[(50, 175.0), (100, 170.0)]));

    let labels: Vec<&str> = cards.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Price", "SMA 50"]);
}

#[test]
fn test_dashboard_symbols_keep_first_seen_order() {
    let analyses = vec![
        analysis("a-3", "MSFT", 5, snapshot(410.0, &[])),
        analysis("a-2", "AAPL", 4, snapshot(187.5, &[])),
        analysis("a-1", "MSFT", 3, snapshot(405.0, &[])),
    ];
    let view = dashboard_view(&analyses, Vec::new());

    assert_eq!(view.symbols, vec!["MSFT".to_string(), "AAPL".to_string()]);
    assert_eq!(view.analyses.len(), 3);
    assert_eq!(view.analyses[0].current_price, Some(410.0));
}
