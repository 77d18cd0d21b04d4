//! Simple Moving Average: trailing mean of close over n bars.
//!
//! Warmup: first (n-1) bars are NaN.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::rolling_mean;

pub fn calculate_sma(series: &PriceSeries, period: usize) -> Vec<f64> {
    rolling_mean(&series.closes(), period)
}
