//! Bollinger Bands indicator

use crate::indicators::sma::calculate_sma;
use serde::{Deserialize, Serialize};

/// One Bollinger point; upper/middle/lower are defined together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandsPoint {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands over a series of closing prices.
///
/// Middle band is the SMA, half-width is `std_dev` times the population
/// standard deviation of the trailing window. `None` before `period - 1`.
pub fn calculate_bollinger(values: &[f64], period: usize, std_dev: f64) -> Vec<Option<BandsPoint>> {
    let sma = calculate_sma(values, period);

    sma.iter()
        .enumerate()
        .map(|(i, middle)| {
            let middle = (*middle)?;
            let std = rolling_stddev(&values[i + 1 - period..=i], middle);
            let half_width = std_dev * std;
            Some(BandsPoint {
                upper: middle + half_width,
                middle,
                lower: middle - half_width,
            })
        })
        .collect()
}

/// Population standard deviation of `window` around a precomputed mean.
fn rolling_stddev(window: &[f64], mean: f64) -> f64 {
    let variance = window
        .iter()
        .map(|v| (v - mean) * (v - mean))
        .sum::<f64>()
        / window.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_warm_up() {
        let values: Vec<f64> = (0..30).map(|v| 100.0 + v as f64).collect();
        let bands = calculate_bollinger(&values, 20, 2.0);

        assert_eq!(bands.len(), values.len());
        for point in bands.iter().take(19) {
            assert!(point.is_none());
        }
        assert!(bands[19].is_some());
    }

    #[test]
    fn test_bollinger_symmetry() {
        let values: Vec<f64> = (0..40).map(|v| 100.0 + (v as f64 * 0.7).sin() * 3.0).collect();
        let bands = calculate_bollinger(&values, 20, 2.0);

        for point in bands.iter().flatten() {
            let upper_gap = point.upper - point.middle;
            let lower_gap = point.middle - point.lower;
            assert!((upper_gap - lower_gap).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bollinger_flat_series_collapses() {
        let values = vec![50.0; 25];
        let bands = calculate_bollinger(&values, 20, 2.0);
        let point = bands[24].unwrap();
        assert_eq!(point.upper, 50.0);
        assert_eq!(point.middle, 50.0);
        assert_eq!(point.lower, 50.0);
    }
}
