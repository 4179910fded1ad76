//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::ema::calculate_ema;
use serde::{Deserialize, Serialize};

/// One MACD point; all three components defined together only once the
/// signal EMA has warmed up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Calculate MACD over a series of closing prices.
///
/// `macd = EMA(fast) - EMA(slow)` wherever both are defined. The signal
/// line is an EMA of the MACD line computed only over its defined suffix
/// and then re-aligned onto the original index space, so the signal's
/// warm-up counts MACD points rather than raw bars. `histogram = macd -
/// signal`. A point is `None` until all three components exist.
pub fn calculate_macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Vec<Option<MacdPoint>> {
    let fast_ema = calculate_ema(values, fast_period);
    let slow_ema = calculate_ema(values, slow_period);

    let macd_line: Vec<Option<f64>> = fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(fast, slow)| match (fast, slow) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let defined_macd: Vec<f64> = macd_line.iter().flatten().copied().collect();
    let signal_line = calculate_ema(&defined_macd, signal_period);

    let mut signal_idx = 0;
    macd_line
        .iter()
        .map(|macd| {
            let macd = (*macd)?;
            let signal = signal_line[signal_idx];
            signal_idx += 1;
            let signal = signal?;
            Some(MacdPoint {
                macd,
                signal,
                histogram: macd - signal,
            })
        })
        .collect()
}
