//! Aroon Up / Down / Oscillator over an n-bar window.
//!
//! Up = 100 * (n - bars since highest high) / n, Down mirrored on lows.
//! Ties resolve to the most recent extreme.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{rolling_bars_since_max, rolling_bars_since_min, zip_with};

#[derive(Debug, Clone)]
pub struct AroonOutput {
    pub up: Vec<f64>,
    pub down: Vec<f64>,
    pub oscillator: Vec<f64>,
}

pub fn calculate_aroon(series: &PriceSeries, period: usize) -> AroonOutput {
    let n = period as f64;
    let to_score = |age: &f64| 100.0 * (n - age) / n;
    let up: Vec<f64> = rolling_bars_since_max(&series.highs(), period)
        .iter()
        .map(to_score)
        .collect();
    let down: Vec<f64> = rolling_bars_since_min(&series.lows(), period)
        .iter()
        .map(to_score)
        .collect();
    let oscillator = zip_with(&up, &down, |u, d| u - d);
    AroonOutput {
        up,
        down,
        oscillator,
    }
}
