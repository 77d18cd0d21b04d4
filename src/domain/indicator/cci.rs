//! Commodity Channel Index.
//!
//! TP = (H + L + C) / 3
//! CCI = (TP - SMA_n(TP)) / (0.015 * MAD_n(TP))
//!
//! A flat window has zero MAD and yields NaN.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{rolling_mad, rolling_mean};

pub const SCALE: f64 = 0.015;

pub fn calculate_cci(series: &PriceSeries, period: usize) -> Vec<f64> {
    let tp: Vec<f64> = series.bars().iter().map(|b| b.typical_price()).collect();
    let sma = rolling_mean(&tp, period);
    let mad = rolling_mad(&tp, period);
    (0..tp.len())
        .map(|i| {
            if mad[i] == 0.0 {
                f64::NAN
            } else {
                (tp[i] - sma[i]) / (SCALE * mad[i])
            }
        })
        .collect()
}
