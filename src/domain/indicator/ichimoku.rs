//! Ichimoku cloud.
//!
//! Tenkan, Kijun: midpoint of highest high and lowest low over their windows.
//! Senkou A: (Tenkan + Kijun) / 2, plotted `kijun` bars ahead.
//! Senkou B: midpoint over the `senkou` window, plotted `kijun` bars ahead.
//! Chikou: close plotted `kijun` bars back. Display only.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{rolling_max, rolling_min, shift, zip_with};

#[derive(Debug, Clone)]
pub struct IchimokuOutput {
    pub tenkan: Vec<f64>,
    pub kijun: Vec<f64>,
    pub senkou_a: Vec<f64>,
    pub senkou_b: Vec<f64>,
    pub chikou: Vec<f64>,
}

fn midpoint(series: &PriceSeries, window: usize) -> Vec<f64> {
    zip_with(
        &rolling_max(&series.highs(), window),
        &rolling_min(&series.lows(), window),
        |h, l| (h + l) / 2.0,
    )
}

pub fn calculate_ichimoku(
    series: &PriceSeries,
    tenkan_period: usize,
    kijun_period: usize,
    senkou_period: usize,
) -> IchimokuOutput {
    let lead = kijun_period as isize;
    let tenkan = midpoint(series, tenkan_period);
    let kijun = midpoint(series, kijun_period);
    let senkou_a = shift(&zip_with(&tenkan, &kijun, |t, k| (t + k) / 2.0), lead);
    let senkou_b = shift(&midpoint(series, senkou_period), lead);
    let chikou = shift(&series.closes(), -lead);

    IchimokuOutput {
        tenkan,
        kijun,
        senkou_a,
        senkou_b,
        chikou,
    }
}
