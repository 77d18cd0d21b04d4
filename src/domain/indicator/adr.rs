//! Average Daily Range: rolling mean of (H - L) over n bars.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::rolling_mean;

pub fn calculate_adr(series: &PriceSeries, period: usize) -> Vec<f64> {
    let ranges: Vec<f64> = series.bars().iter().map(|b| b.range()).collect();
    rolling_mean(&ranges, period)
}
