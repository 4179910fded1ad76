//! KDJ stochastic oscillator

use serde::{Deserialize, Serialize};

/// One KDJ point. `j = 3k - 2d`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KdjPoint {
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

/// Calculate KDJ over aligned high/low/close columns.
///
/// RSV is the close's position inside the rolling `period` high/low window,
/// scaled to 0..100 (a flat window yields the neutral 50). K and D smooth
/// RSV with `(prev * (smooth - 1) + current) / smooth`, both seeded at 50.
/// Classic parameters are (9, 3, 3). `None` before `period - 1`.
pub fn calculate_kdj(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    k_smooth: usize,
    d_smooth: usize,
) -> Vec<Option<KdjPoint>> {
    debug_assert_eq!(highs.len(), lows.len());
    debug_assert_eq!(highs.len(), closes.len());

    let mut results = Vec::with_capacity(closes.len());
    let mut k = 50.0;
    let mut d = 50.0;

    for i in 0..closes.len() {
        if i + 1 < period {
            results.push(None);
            continue;
        }

        let window = i + 1 - period..=i;
        let highest = highs[window.clone()].iter().cloned().fold(f64::MIN, f64::max);
        let lowest = lows[window].iter().cloned().fold(f64::MAX, f64::min);

        let rsv = if highest == lowest {
            50.0
        } else {
            100.0 * (closes[i] - lowest) / (highest - lowest)
        };

        k = (k * (k_smooth as f64 - 1.0) + rsv) / k_smooth as f64;
        d = (d * (d_smooth as f64 - 1.0) + k) / d_smooth as f64;

        results.push(Some(KdjPoint {
            k,
            d,
            j: 3.0 * k - 2.0 * d,
        }));
    }

    results
}
