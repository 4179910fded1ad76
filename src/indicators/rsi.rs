//! RSI (Relative Strength Index) indicator, Wilder smoothing

/// Calculate RSI over a series of closing prices.
///
/// The first value appears at index `period`, computed from the simple
/// average of gains and losses over the first `period` deltas. After that
/// Wilder's recurrence `avg = (avg_prev * (period - 1) + current) / period`
/// is applied to the gain and loss averages independently. When the average
/// loss is zero RSI saturates at 100 instead of dividing by zero.
pub fn calculate_rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut results = Vec::with_capacity(values.len());
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;

    for (i, &value) in values.iter().enumerate() {
        if i == 0 {
            results.push(None);
            continue;
        }

        let change = value - values[i - 1];
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);

        if i < period {
            avg_gain += gain;
            avg_loss += loss;
            results.push(None);
        } else if i == period {
            avg_gain = (avg_gain + gain) / period as f64;
            avg_loss = (avg_loss + loss) / period as f64;
            results.push(Some(rsi_from_averages(avg_gain, avg_loss)));
        } else {
            avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
            avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
            results.push(Some(rsi_from_averages(avg_gain, avg_loss)));
        }
    }

    results
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    // No losses in the window: RS is unbounded, RSI saturates.
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Dual-period RSI pair for multi-horizon confirmation.
///
/// Same algorithm run twice with independent periods; the dashboard uses a
/// fast 13 / slow 42 pairing.
pub fn calculate_rsi_pair(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    (
        calculate_rsi(values, fast_period),
        calculate_rsi(values, slow_period),
    )
}
