//! EMA (Exponential Moving Average) indicator

/// Calculate EMA over a series of values.
///
/// The multiplier is `2 / (period + 1)`. The series is seeded at index
/// `period - 1` with the SMA of the first `period` values, not with the
/// first data point; every downstream indicator (MACD in particular)
/// depends on this convention. `None` before the seed index.
pub fn calculate_ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut results = Vec::with_capacity(values.len());
    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut prev: Option<f64> = None;

    for (i, &value) in values.iter().enumerate() {
        if i + 1 < period {
            results.push(None);
        } else if i + 1 == period {
            let seed = values[..period].iter().sum::<f64>() / period as f64;
            prev = Some(seed);
            results.push(prev);
        } else {
            let last = prev.unwrap_or(value);
            let ema = (value - last) * multiplier + last;
            prev = Some(ema);
            results.push(prev);
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_seeded_with_sma() {
        let values: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let ema = calculate_ema(&values, 3);

        assert_eq!(ema[0], None);
        assert_eq!(ema[1], None);
        // seed = mean(1, 2, 3)
        assert_eq!(ema[2], Some(2.0));
        // (4 - 2) * 0.5 + 2
        assert_eq!(ema[3], Some(3.0));
        assert_eq!(ema[4], Some(4.0));
    }

    #[test]
    fn test_ema_alignment() {
        let values = vec![5.0; 40];
        let ema = calculate_ema(&values, 12);
        assert_eq!(ema.len(), values.len());
        // constant input stays at the constant
        assert_eq!(ema[39], Some(5.0));
    }

    #[test]
    fn test_ema_empty_input() {
        assert!(calculate_ema(&[], 12).is_empty());
    }
}
