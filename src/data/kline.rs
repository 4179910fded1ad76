//! OHLCV kline data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fixed-interval OHLCV bar.
///
/// `time` is the bar's opening timestamp in Unix seconds. Klines are
/// immutable once produced by an adapter; downstream code only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    /// Bar open time (Unix seconds)
    pub time: i64,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
}

impl Kline {
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Bar open time as a chrono timestamp.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }

    /// Get typical price (HLC/3)
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Check if kline is bullish
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if kline is bearish
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Get body size (absolute difference between open and close)
    pub fn body_size(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Get total range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Collection of klines with column-wise accessors for the indicator engine.
#[derive(Debug, Clone, Default)]
pub struct KlineSeries {
    klines: Vec<Kline>,
}

impl KlineSeries {
    pub fn new() -> Self {
        Self { klines: Vec::new() }
    }

    pub fn from_vec(klines: Vec<Kline>) -> Self {
        Self { klines }
    }

    pub fn push(&mut self, kline: Kline) {
        self.klines.push(kline);
    }

    pub fn len(&self) -> usize {
        self.klines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.klines.is_empty()
    }

    pub fn last(&self) -> Option<&Kline> {
        self.klines.last()
    }

    pub fn klines(&self) -> &[Kline] {
        &self.klines
    }

    /// Get close prices as vector
    pub fn closes(&self) -> Vec<f64> {
        self.klines.iter().map(|k| k.close).collect()
    }

    /// Get open prices as vector
    pub fn opens(&self) -> Vec<f64> {
        self.klines.iter().map(|k| k.open).collect()
    }

    /// Get high prices as vector
    pub fn highs(&self) -> Vec<f64> {
        self.klines.iter().map(|k| k.high).collect()
    }

    /// Get low prices as vector
    pub fn lows(&self) -> Vec<f64> {
        self.klines.iter().map(|k| k.low).collect()
    }

    /// Get volumes as vector
    pub fn volumes(&self) -> Vec<f64> {
        self.klines.iter().map(|k| k.volume).collect()
    }

    /// Sort by open time (oldest first)
    pub fn sort_by_time(&mut self) {
        self.klines.sort_by_key(|k| k.time);
    }

    /// True when timestamps strictly increase (no duplicates, no reordering).
    pub fn is_ascending(&self) -> bool {
        self.klines.windows(2).all(|w| w[0].time < w[1].time)
    }
}

impl From<Vec<Kline>> for KlineSeries {
    fn from(klines: Vec<Kline>) -> Self {
        Self::from_vec(klines)
    }
}
