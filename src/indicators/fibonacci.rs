//! Fibonacci retracement levels and nearest support/resistance

use serde::{Deserialize, Serialize};

use crate::models::indicators::{IndicatorSnapshot, CURRENT_PRICE};
use crate::models::signal::{Signal, SignalCategory};

/// Padding applied to the extremes when the swing range is estimated
const ESTIMATE_PADDING: f64 = 0.05;

/// Indicators used to estimate a swing range when none is given
const RANGE_SOURCES: [&str; 4] = ["SMA_20", "SMA_50", "SMA_200", CURRENT_PRICE];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelKind {
    Resistance,
    Key,
    Support,
}

pub struct FibRatio {
    pub ratio: f64,
    pub label: &'static str,
    pub short_label: &'static str,
    pub kind: LevelKind,
    pub color: &'static str,
}

pub const FIB_RATIOS: [FibRatio; 7] = [
    FibRatio {
        ratio: 0.0,
        label: "0%",
        short_label: "0%",
        kind: LevelKind::Resistance,
        color: "#22c55e",
    },
    FibRatio {
        ratio: 0.236,
        label: "23.6%",
        short_label: "23.6%",
        kind: LevelKind::Resistance,
        color: "#84cc16",
    },
    FibRatio {
        ratio: 0.382,
        label: "38.2%",
        short_label: "38.2%",
        kind: LevelKind::Key,
        color: "#eab308",
    },
    FibRatio {
        ratio: 0.5,
        label: "50%",
        short_label: "50%",
        kind: LevelKind::Key,
        color: "#f97316",
    },
    FibRatio {
        ratio: 0.618,
        label: "61.8% (Golden)",
        short_label: "61.8%",
        kind: LevelKind::Key,
        color: "#ef4444",
    },
    FibRatio {
        ratio: 0.786,
        label: "78.6%",
        short_label: "78.6%",
        kind: LevelKind::Support,
        color: "#dc2626",
    },
    FibRatio {
        ratio: 1.0,
        label: "100%",
        short_label: "100%",
        kind: LevelKind::Support,
        color: "#b91c1c",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingRange {
    pub high: f64,
    pub low: f64,
    /// True when derived from moving averages rather than observed swings
    pub estimated: bool,
}

impl SwingRange {
    pub fn new(high: f64, low: f64) -> Self {
        Self {
            high,
            low,
            estimated: false,
        }
    }

    /// Estimate from the positive price-like readings, padded by 5% each way.
    pub fn estimate(snapshot: &IndicatorSnapshot) -> Option<Self> {
        let prices: Vec<f64> = RANGE_SOURCES
            .iter()
            .filter_map(|name| snapshot.get(name))
            .filter(|p| *p > 0.0)
            .collect();
        if prices.is_empty() {
            return None;
        }
        let max = prices.iter().copied().fold(f64::MIN, f64::max);
        let min = prices.iter().copied().fold(f64::MAX, f64::min);
        Some(Self {
            high: max * (1.0 + ESTIMATE_PADDING),
            low: min * (1.0 - ESTIMATE_PADDING),
            estimated: true,
        })
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    pub fn price_at(&self, ratio: f64) -> f64 {
        self.high - self.span() * ratio
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelRole {
    Resistance,
    Support,
    AtPrice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibLevel {
    pub ratio: f64,
    pub label: String,
    pub short_label: String,
    pub kind: LevelKind,
    pub color: String,
    pub price: f64,
    pub role: LevelRole,
    /// Signed distance from the current price, in percent of the price
    pub distance_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibZone {
    pub upper: FibLevel,
    pub lower: FibLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FibonacciView {
    pub current_price: f64,
    pub range: SwingRange,
    /// Ordered from the swing high (ratio 0) down to the swing low
    pub levels: Vec<FibLevel>,
    pub current_zone: Option<FibZone>,
    /// `None` when the price is above every level
    pub nearest_resistance: Option<FibLevel>,
    /// `None` when the price is below every level
    pub nearest_support: Option<FibLevel>,
    pub resistance_count: usize,
    pub support_count: usize,
}

pub fn fibonacci_levels(range: SwingRange, current_price: f64) -> Vec<FibLevel> {
    FIB_RATIOS
        .iter()
        .map(|fib| {
            let price = range.price_at(fib.ratio);
            let role = if price > current_price {
                LevelRole::Resistance
            } else if price < current_price {
                LevelRole::Support
            } else {
                LevelRole::AtPrice
            };
            let distance_pct = if current_price != 0.0 {
                (price - current_price) / current_price * 100.0
            } else {
                0.0
            };
            FibLevel {
                ratio: fib.ratio,
                label: fib.label.to_string(),
                short_label: fib.short_label.to_string(),
                kind: fib.kind,
                color: fib.color.to_string(),
                price,
                role,
                distance_pct,
            }
        })
        .collect()
}

pub fn fibonacci_view(range: SwingRange, current_price: f64) -> FibonacciView {
    let levels = fibonacci_levels(range, current_price);

    let current_zone = levels
        .windows(2)
        .find(|pair| current_price <= pair[0].price && current_price >= pair[1].price)
        .map(|pair| FibZone {
            upper: pair[0].clone(),
            lower: pair[1].clone(),
        });

    let resistances = || levels.iter().filter(|l| l.role == LevelRole::Resistance);
    let supports = || levels.iter().filter(|l| l.role == LevelRole::Support);

    let nearest_resistance = resistances()
        .min_by(|a, b| a.price.total_cmp(&b.price))
        .cloned();
    let nearest_support = supports()
        .max_by(|a, b| a.price.total_cmp(&b.price))
        .cloned();
    let resistance_count = resistances().count();
    let support_count = supports().count();

    FibonacciView {
        current_price,
        range,
        resistance_count,
        support_count,
        current_zone,
        nearest_resistance,
        nearest_support,
        levels,
    }
}

/// Fibonacci view over the estimated swing range; `None` without a price
pub fn snapshot_fibonacci(snapshot: &IndicatorSnapshot) -> Option<FibonacciView> {
    let price = snapshot.current_price()?;
    let range = SwingRange::estimate(snapshot)?;
    Some(fibonacci_view(range, price))
}

pub fn fibonacci_signals(signals: &[Signal]) -> Vec<Signal> {
    signals
        .iter()
        .filter(|s| s.category == SignalCategory::Fibonacci || s.name.contains("FIB"))
        .cloned()
        .collect()
}
