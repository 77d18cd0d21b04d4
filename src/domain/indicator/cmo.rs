//! Chande Momentum Oscillator: 100 * (ΣG - ΣL) / (ΣG + ΣL) over n changes.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{diff, rolling_sum};

pub fn calculate_cmo(series: &PriceSeries, period: usize) -> Vec<f64> {
    let changes = diff(&series.closes());
    let gains: Vec<f64> = changes
        .iter()
        .map(|&c| if c.is_nan() { c } else { c.max(0.0) })
        .collect();
    let losses: Vec<f64> = changes
        .iter()
        .map(|&c| if c.is_nan() { c } else { (-c).max(0.0) })
        .collect();
    let sum_gain = rolling_sum(&gains, period);
    let sum_loss = rolling_sum(&losses, period);
    sum_gain
        .iter()
        .zip(&sum_loss)
        .map(|(g, l)| 100.0 * (g - l) / (g + l))
        .collect()
}
