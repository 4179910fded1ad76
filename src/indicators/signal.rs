//! Three-way signal classification for the indicator panel.
//!
//! Presentation policy, not computation: the thresholds here can change
//! without touching the indicator math.

use crate::indicators::{BandsPoint, KdjPoint, MacdPoint};
use serde::{Deserialize, Serialize};

pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const WILLIAMS_OVERBOUGHT: f64 = -20.0;
pub const WILLIAMS_OVERSOLD: f64 = -80.0;
pub const KDJ_OVERBOUGHT: f64 = 80.0;
pub const KDJ_OVERSOLD: f64 = 20.0;
/// Price-vs-moving-average tolerance band (2%).
pub const MA_BAND: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
}

/// Overbought RSI leans bearish, oversold leans bullish.
pub fn rsi_signal(rsi: f64) -> Signal {
    if rsi >= RSI_OVERBOUGHT {
        Signal::Bearish
    } else if rsi <= RSI_OVERSOLD {
        Signal::Bullish
    } else {
        Signal::Neutral
    }
}

/// Price touching the upper band reads as stretched (bearish-leaning),
/// touching the lower band as washed out (bullish-leaning).
pub fn bollinger_signal(price: f64, bands: &BandsPoint) -> Signal {
    if price >= bands.upper {
        Signal::Bearish
    } else if price <= bands.lower {
        Signal::Bullish
    } else {
        Signal::Neutral
    }
}

/// Price more than [`MA_BAND`] above the average is bullish, more than
/// [`MA_BAND`] below is bearish, inside the band is neutral.
pub fn ma_signal(price: f64, ma: f64) -> Signal {
    if price > ma * (1.0 + MA_BAND) {
        Signal::Bullish
    } else if price < ma * (1.0 - MA_BAND) {
        Signal::Bearish
    } else {
        Signal::Neutral
    }
}

/// Histogram sign: expanding above zero is bullish momentum.
pub fn macd_signal(point: &MacdPoint) -> Signal {
    if point.histogram > 0.0 {
        Signal::Bullish
    } else if point.histogram < 0.0 {
        Signal::Bearish
    } else {
        Signal::Neutral
    }
}

pub fn kdj_signal(point: &KdjPoint) -> Signal {
    if point.k >= KDJ_OVERBOUGHT {
        Signal::Bearish
    } else if point.k <= KDJ_OVERSOLD {
        Signal::Bullish
    } else {
        Signal::Neutral
    }
}

pub fn williams_r_signal(wr: f64) -> Signal {
    if wr >= WILLIAMS_OVERBOUGHT {
        Signal::Bearish
    } else if wr <= WILLIAMS_OVERSOLD {
        Signal::Bullish
    } else {
        Signal::Neutral
    }
}
