//! Donchian channel: highest high, lowest low and their midpoint over n bars.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{rolling_max, rolling_min, zip_with};

#[derive(Debug, Clone)]
pub struct DonchianOutput {
    pub middle: Vec<f64>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

pub fn calculate_donchian(series: &PriceSeries, period: usize) -> DonchianOutput {
    let upper = rolling_max(&series.highs(), period);
    let lower = rolling_min(&series.lows(), period);
    let middle = zip_with(&upper, &lower, |u, l| (u + l) / 2.0);
    DonchianOutput {
        middle,
        upper,
        lower,
    }
}
