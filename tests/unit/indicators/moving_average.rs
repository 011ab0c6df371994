//! Unit tests for moving-average positioning

use signalscope::indicators::{classify_position, ma_positioning, MaPosition};
use signalscope::models::IndicatorSnapshot;

use crate::common_fixtures::snapshot;

#[test]
fn test_no_sma_keys_is_no_data() {
    let snapshot = IndicatorSnapshot::new()
        .with("Current_Price", 100.0)
        .with("MACD", 0.4);
    assert!(ma_positioning(&snapshot).is_none());
}

#[test]
fn test_missing_price_is_no_data() {
    let snapshot = IndicatorSnapshot::new().with_sma(20, 99.0);
    assert!(ma_positioning(&snapshot).is_none());
}

#[test]
fn test_price_above_all_averages() {
    let indicators = snapshot(110.0, &[(20, 105.0), (50, 100.0), (200, 90.0)]);
    let positioning = ma_positioning(&indicators).unwrap();
    assert_eq!(positioning.position, MaPosition::AboveAll);
    assert!(positioning.distances.iter().all(|d| d.above));
}

#[test]
fn test_price_below_all_averages() {
    let positioning = ma_positioning(&snapshot(80.0, &[(20, 85.0), (50, 90.0)])).unwrap();
    assert_eq!(positioning.position, MaPosition::BelowAll);
}

#[test]
fn test_mixed_position() {
    let positioning = ma_positioning(&snapshot(100.0, &[(20, 105.0), (200, 90.0)])).unwrap();
    assert_eq!(positioning.position, MaPosition::Mixed);
}

#[test]
fn test_price_equal_to_average_is_mixed() {
    assert_eq!(classify_position(100.0, &[100.0]), Some(MaPosition::Mixed));
    assert_eq!(classify_position(100.0, &[]), None);
}

#[test]
fn test_distance_percentages() {
    let positioning = ma_positioning(&snapshot(110.0, &[(50, 100.0), (20, 110.0)])).unwrap();

    let sma20 = &positioning.distances[0];
    assert_eq!(sma20.period, 20);
    assert_eq!(sma20.label, "SMA 20");
    assert_eq!(sma20.diff_pct, 0.0);
    assert!(!sma20.above);

    let sma50 = &positioning.distances[1];
    assert!((sma50.diff_pct - 10.0).abs() < 1e-9);
    assert!(sma50.above);
}
