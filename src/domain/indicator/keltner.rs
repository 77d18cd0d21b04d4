//! Keltner channel: EMA(n) midline with bands at multiplier × ATR(n).
//!
//! ATR here is the rolling mean of true range, not Wilder-smoothed.

use crate::domain::indicator::adx::true_range;
use crate::domain::price_series::PriceSeries;
use crate::domain::series::{ema, rolling_mean};

#[derive(Debug, Clone)]
pub struct KeltnerOutput {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn calculate_keltner(series: &PriceSeries, period: usize, multiplier: f64) -> KeltnerOutput {
    let middle = ema(&series.closes(), period);
    let atr = rolling_mean(&true_range(series), period);

    let upper = middle
        .iter()
        .zip(&atr)
        .map(|(m, a)| m + multiplier * a)
        .collect();
    let lower = middle
        .iter()
        .zip(&atr)
        .map(|(m, a)| m - multiplier * a)
        .collect();

    KeltnerOutput {
        middle,
        upper,
        lower,
    }
}
