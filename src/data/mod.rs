//! Canonical market data model shared by adapters and the indicator engine.

pub mod kline;
pub mod snapshot;

pub use kline::*;
pub use snapshot::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed bar interval understood by every adapter.
///
/// Each adapter owns a total mapping from this enum to its own interval
/// token, so the aggregator never hands an adapter a timeframe it cannot
/// serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    M1,
    M5,
    M15,
    H1,
    H4,
    D1,
    W1,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 7] = [
        TimeFrame::M1,
        TimeFrame::M5,
        TimeFrame::M15,
        TimeFrame::H1,
        TimeFrame::H4,
        TimeFrame::D1,
        TimeFrame::W1,
    ];

    /// Canonical token, also the Binance wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFrame::M1 => "1m",
            TimeFrame::M5 => "5m",
            TimeFrame::M15 => "15m",
            TimeFrame::H1 => "1h",
            TimeFrame::H4 => "4h",
            TimeFrame::D1 => "1d",
            TimeFrame::W1 => "1w",
        }
    }

    /// Bar length in seconds.
    pub fn seconds(&self) -> i64 {
        match self {
            TimeFrame::M1 => 60,
            TimeFrame::M5 => 300,
            TimeFrame::M15 => 900,
            TimeFrame::H1 => 3_600,
            TimeFrame::H4 => 14_400,
            TimeFrame::D1 => 86_400,
            TimeFrame::W1 => 604_800,
        }
    }
}

impl FromStr for TimeFrame {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(TimeFrame::M1),
            "5m" => Ok(TimeFrame::M5),
            "15m" => Ok(TimeFrame::M15),
            "1h" => Ok(TimeFrame::H1),
            "4h" => Ok(TimeFrame::H4),
            "1d" => Ok(TimeFrame::D1),
            "1w" => Ok(TimeFrame::W1),
            _ => Err(anyhow::anyhow!("unsupported timeframe: {}", s)),
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
