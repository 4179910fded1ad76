//! Technical indicators module
//!
//! Every indicator is a pure function over price columns with index-aligned
//! output: `series[i]` always corresponds to `klines[i]`, and indices before
//! an indicator's minimum lookback are `None` rather than zero or NaN. All
//! math is plain `f64`; rounding is a presentation concern left to callers.

pub mod bb;
pub mod ema;
pub mod kdj;
pub mod macd;
pub mod rsi;
pub mod signal;
pub mod sma;
pub mod williams_r;

pub use bb::*;
pub use ema::*;
pub use kdj::*;
pub use macd::*;
pub use rsi::*;
pub use signal::*;
pub use sma::*;
pub use williams_r::*;

use crate::data::Kline;
use serde::{Deserialize, Serialize};

// Standard parameter set used by the dashboard.
pub const MA_PERIODS: [usize; 4] = [7, 21, 50, 200];
pub const RSI_PERIOD: usize = 14;
pub const RSI_FAST_PERIOD: usize = 13;
pub const RSI_SLOW_PERIOD: usize = 42;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD_DEV: f64 = 2.0;
pub const KDJ_PERIOD: usize = 9;
pub const KDJ_K_SMOOTH: usize = 3;
pub const KDJ_D_SMOOTH: usize = 3;
pub const WILLIAMS_PERIOD: usize = 14;

/// Latest value of every indicator for one kline series.
///
/// Each field is individually `None` while its indicator is still warming
/// up; an empty input yields the all-`None` snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorValues {
    pub ma7: Option<f64>,
    pub ma21: Option<f64>,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub rsi: Option<f64>,
    pub rsi_fast: Option<f64>,
    pub rsi_slow: Option<f64>,
    pub macd: Option<MacdPoint>,
    pub bollinger: Option<BandsPoint>,
    pub kdj: Option<KdjPoint>,
    pub williams_r: Option<f64>,
}

/// Full per-bar history of every indicator, index-aligned with the input
/// klines so the chart can plot each point against its bar's time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    pub ma7: Vec<Option<f64>>,
    pub ma21: Vec<Option<f64>>,
    pub ma50: Vec<Option<f64>>,
    pub ma200: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub rsi_fast: Vec<Option<f64>>,
    pub rsi_slow: Vec<Option<f64>>,
    pub macd: Vec<Option<MacdPoint>>,
    pub bollinger: Vec<Option<BandsPoint>>,
    pub kdj: Vec<Option<KdjPoint>>,
    pub williams_r: Vec<Option<f64>>,
}

impl IndicatorSeries {
    /// Snapshot of the newest point of every series.
    pub fn latest(&self) -> IndicatorValues {
        fn last<T: Copy>(series: &[Option<T>]) -> Option<T> {
            series.last().copied().flatten()
        }

        IndicatorValues {
            ma7: last(&self.ma7),
            ma21: last(&self.ma21),
            ma50: last(&self.ma50),
            ma200: last(&self.ma200),
            rsi: last(&self.rsi),
            rsi_fast: last(&self.rsi_fast),
            rsi_slow: last(&self.rsi_slow),
            macd: last(&self.macd),
            bollinger: last(&self.bollinger),
            kdj: last(&self.kdj),
            williams_r: last(&self.williams_r),
        }
    }
}

/// Compute the full aligned indicator history for a kline series.
///
/// Safe on any input length: an empty series produces empty vectors, a
/// short series produces all-`None` prefixes per indicator.
pub fn indicator_series(klines: &[Kline]) -> IndicatorSeries {
    let closes: Vec<f64> = klines.iter().map(|k| k.close).collect();
    let highs: Vec<f64> = klines.iter().map(|k| k.high).collect();
    let lows: Vec<f64> = klines.iter().map(|k| k.low).collect();

    let (rsi_fast, rsi_slow) = calculate_rsi_pair(&closes, RSI_FAST_PERIOD, RSI_SLOW_PERIOD);

    IndicatorSeries {
        ma7: calculate_sma(&closes, MA_PERIODS[0]),
        ma21: calculate_sma(&closes, MA_PERIODS[1]),
        ma50: calculate_sma(&closes, MA_PERIODS[2]),
        ma200: calculate_sma(&closes, MA_PERIODS[3]),
        rsi: calculate_rsi(&closes, RSI_PERIOD),
        rsi_fast,
        rsi_slow,
        macd: calculate_macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL),
        bollinger: calculate_bollinger(&closes, BOLLINGER_PERIOD, BOLLINGER_STD_DEV),
        kdj: calculate_kdj(&highs, &lows, &closes, KDJ_PERIOD, KDJ_K_SMOOTH, KDJ_D_SMOOTH),
        williams_r: calculate_williams_r(&highs, &lows, &closes, WILLIAMS_PERIOD),
    }
}

/// Compute the latest-value snapshot for a kline series.
pub fn calculate_indicators(klines: &[Kline]) -> IndicatorValues {
    indicator_series(klines).latest()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn klines(n: usize) -> Vec<Kline> {
        (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.3).sin() * 5.0;
                Kline::new(
                    1_700_000_000 + i as i64 * 3600,
                    close - 0.5,
                    close + 1.0,
                    close - 1.0,
                    close,
                    1_000.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_input_is_not_an_error() {
        let values = calculate_indicators(&[]);
        assert_eq!(values, IndicatorValues::default());

        let series = indicator_series(&[]);
        assert!(series.rsi.is_empty());
        assert!(series.macd.is_empty());
    }

    #[test]
    fn test_series_lengths_match_input() {
        let input = klines(120);
        let series = indicator_series(&input);

        assert_eq!(series.ma7.len(), input.len());
        assert_eq!(series.ma200.len(), input.len());
        assert_eq!(series.rsi.len(), input.len());
        assert_eq!(series.rsi_slow.len(), input.len());
        assert_eq!(series.macd.len(), input.len());
        assert_eq!(series.bollinger.len(), input.len());
        assert_eq!(series.kdj.len(), input.len());
        assert_eq!(series.williams_r.len(), input.len());
    }

    #[test]
    fn test_latest_matches_series_tail() {
        let input = klines(120);
        let series = indicator_series(&input);
        let values = calculate_indicators(&input);

        assert_eq!(values.rsi, *series.rsi.last().unwrap());
        assert_eq!(values.macd, *series.macd.last().unwrap());
        assert_eq!(values.bollinger, *series.bollinger.last().unwrap());
    }

    #[test]
    fn test_short_series_leaves_slow_indicators_unset() {
        // 120 bars: MA200 still warming up, everything else defined
        let values = calculate_indicators(&klines(120));
        assert!(values.ma200.is_none());
        assert!(values.ma50.is_some());
        assert!(values.rsi.is_some());
        assert!(values.rsi_slow.is_some());
        assert!(values.kdj.is_some());
        assert!(values.williams_r.is_some());
    }
}
