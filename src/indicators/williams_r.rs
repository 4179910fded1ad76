//! Williams %R indicator

/// Calculate Williams %R over aligned high/low/close columns.
///
/// `-100 * (highest_high - close) / (highest_high - lowest_low)` over the
/// trailing `period` window, so values live in -100..0. A flat window
/// (highest == lowest) returns the neutral midpoint -50 instead of
/// dividing by zero. `None` before `period - 1`.
pub fn calculate_williams_r(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
) -> Vec<Option<f64>> {
    debug_assert_eq!(highs.len(), lows.len());
    debug_assert_eq!(highs.len(), closes.len());

    let mut results = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        if i + 1 < period {
            results.push(None);
            continue;
        }

        let window = i + 1 - period..=i;
        let highest = highs[window.clone()].iter().cloned().fold(f64::MIN, f64::max);
        let lowest = lows[window].iter().cloned().fold(f64::MAX, f64::min);

        if highest == lowest {
            results.push(Some(-50.0));
        } else {
            results.push(Some(-100.0 * (highest - closes[i]) / (highest - lowest)));
        }
    }

    results
}
