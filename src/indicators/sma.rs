//! SMA (Simple Moving Average) indicator

/// Calculate SMA over a series of values.
///
/// Output is index-aligned with the input; indices before `period - 1` are
/// `None`.
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut results = Vec::with_capacity(values.len());
    let mut window_sum = 0.0;

    for (i, &value) in values.iter().enumerate() {
        window_sum += value;
        if i >= period {
            window_sum -= values[i - period];
        }
        if i + 1 >= period {
            results.push(Some(window_sum / period as f64));
        } else {
            results.push(None);
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_warm_up() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sma = calculate_sma(&values, 3);

        assert_eq!(sma.len(), values.len());
        assert_eq!(sma[0], None);
        assert_eq!(sma[1], None);
        assert_eq!(sma[2], Some(2.0));
        assert_eq!(sma[3], Some(3.0));
        assert_eq!(sma[4], Some(4.0));
    }

    #[test]
    fn test_sma_shorter_than_period() {
        let sma = calculate_sma(&[1.0, 2.0], 5);
        assert_eq!(sma, vec![None, None]);
    }

    #[test]
    fn test_sma_empty_input() {
        assert!(calculate_sma(&[], 14).is_empty());
    }
}
