//! Psychological line and its normalized form.
//!
//! An up-day closes above the prior close; the first bar is never an up-day.
//! PSY  = 100 * ups / n                      in [0, 100]
//! NPSY = 100 * (ups - n/2) / (n/2)          in [-100, 100]

use crate::domain::price_series::PriceSeries;
use crate::domain::series::rolling_sum;

fn up_days(series: &PriceSeries, period: usize) -> Vec<f64> {
    let closes = series.closes();
    let ups: Vec<f64> = (0..closes.len())
        .map(|i| {
            if i > 0 && closes[i] > closes[i - 1] {
                1.0
            } else {
                0.0
            }
        })
        .collect();
    rolling_sum(&ups, period)
}

pub fn calculate_psy(series: &PriceSeries, period: usize) -> Vec<f64> {
    let n = period as f64;
    up_days(series, period)
        .into_iter()
        .map(|ups| 100.0 * ups / n)
        .collect()
}

pub fn calculate_npsy(series: &PriceSeries, period: usize) -> Vec<f64> {
    let half = period as f64 / 2.0;
    up_days(series, period)
        .into_iter()
        .map(|ups| 100.0 * (ups - half) / half)
        .collect()
}
