//! Stochastic oscillator.
//!
//! %K = 100 * (C - LL_k) / (HH_k - LL_k)
//! %D = SMA_d(%K)

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{rolling_max, rolling_mean, rolling_min};

#[derive(Debug, Clone)]
pub struct StochasticOutput {
    pub k: Vec<f64>,
    pub d: Vec<f64>,
}

pub fn calculate_stochastic(
    series: &PriceSeries,
    k_period: usize,
    d_period: usize,
) -> StochasticOutput {
    let closes = series.closes();
    let hh = rolling_max(&series.highs(), k_period);
    let ll = rolling_min(&series.lows(), k_period);
    let k: Vec<f64> = (0..closes.len())
        .map(|i| 100.0 * (closes[i] - ll[i]) / (hh[i] - ll[i]))
        .collect();
    let d = rolling_mean(&k, d_period);
    StochasticOutput { k, d }
}
