//! True Strength Index.
//!
//! m = C[i] - C[i-1]
//! TSI = 100 * EMA_short(EMA_long(m)) / EMA_short(EMA_long(|m|))
//! Signal = EMA_signal(TSI)
//!
//! A zero denominator (no price movement at all) yields NaN.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{diff, ema};

#[derive(Debug, Clone)]
pub struct TsiOutput {
    pub tsi: Vec<f64>,
    pub signal: Vec<f64>,
}

pub fn calculate_tsi(series: &PriceSeries, short: usize, long: usize, signal: usize) -> TsiOutput {
    let momentum = diff(&series.closes());
    let abs_momentum: Vec<f64> = momentum.iter().map(|m| m.abs()).collect();

    let smoothed = ema(&ema(&momentum, long), short);
    let smoothed_abs = ema(&ema(&abs_momentum, long), short);

    let tsi: Vec<f64> = smoothed
        .iter()
        .zip(&smoothed_abs)
        .map(|(&num, &den)| {
            if den == 0.0 {
                f64::NAN
            } else {
                100.0 * num / den
            }
        })
        .collect();
    let signal = ema(&tsi, signal);

    TsiOutput { tsi, signal }
}
