//! Bollinger Bands.
//!
//! - Middle: SMA over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the sample standard deviation (divides by N-1).
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) bars are NaN.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{rolling_mean, rolling_std};

#[derive(Debug, Clone)]
pub struct BollingerOutput {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl BollingerOutput {
    /// Upper minus lower band per bar.
    pub fn width(&self) -> Vec<f64> {
        self.upper
            .iter()
            .zip(&self.lower)
            .map(|(u, l)| u - l)
            .collect()
    }
}

pub fn calculate_bollinger(series: &PriceSeries, period: usize, multiplier: f64) -> BollingerOutput {
    let closes = series.closes();
    let middle = rolling_mean(&closes, period);
    let std = rolling_std(&closes, period);

    let mut upper = Vec::with_capacity(closes.len());
    let mut lower = Vec::with_capacity(closes.len());
    for (m, s) in middle.iter().zip(&std) {
        upper.push(m + multiplier * s);
        lower.push(m - multiplier * s);
    }

    BollingerOutput {
        middle,
        upper,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::series_from_closes;
    use approx::assert_relative_eq;

    #[test]
    fn bollinger_warmup() {
        let out = calculate_bollinger(&series_from_closes(&[1.0, 2.0, 3.0, 4.0]), 3, 2.0);
        assert!(out.middle[1].is_nan());
        assert!(out.upper[1].is_nan());
        assert!(!out.lower[2].is_nan());
    }

    #[test]
    fn bands_use_sample_stddev() {
        let out = calculate_bollinger(&series_from_closes(&[2.0, 4.0, 6.0]), 3, 2.0);
        // sample std of 2,4,6 is 2
        assert_relative_eq!(out.middle[2], 4.0);
        assert_relative_eq!(out.upper[2], 8.0, epsilon = 1e-12);
        assert_relative_eq!(out.lower[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_series_has_zero_width() {
        let out = calculate_bollinger(&series_from_closes(&[50.0; 30]), 20, 2.0);
        let width = out.width();
        assert!(width[18].is_nan());
        for w in &width[19..] {
            assert_eq!(*w, 0.0);
        }
    }
}
