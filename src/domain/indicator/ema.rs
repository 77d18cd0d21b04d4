//! Exponential Moving Average of close.
//!
//! k = 2/(n+1), EMA[0] = C[0], then EMA[i] = C[i]*k + EMA[i-1]*(1-k).
//! No warmup: the first bar seeds the recursion.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::ema;

pub fn calculate_ema(series: &PriceSeries, period: usize) -> Vec<f64> {
    ema(&series.closes(), period)
}
