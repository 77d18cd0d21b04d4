//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(short) - EMA(long)
//! Signal Line = EMA(signal) of MACD Line
//! Histogram = MACD Line - Signal Line
//!
//! Every EMA is seeded by its first input, so all three lines are defined
//! from the first bar.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{ema, zip_with};

pub const DEFAULT_SHORT: usize = 12;
pub const DEFAULT_LONG: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

#[derive(Debug, Clone)]
pub struct MacdOutput {
    pub line: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn calculate_macd(
    series: &PriceSeries,
    short: usize,
    long: usize,
    signal_period: usize,
) -> MacdOutput {
    let closes = series.closes();
    let line = zip_with(&ema(&closes, short), &ema(&closes, long), |s, l| s - l);
    let signal = ema(&line, signal_period);
    let histogram = zip_with(&line, &signal, |l, s| l - s);
    MacdOutput {
        line,
        signal,
        histogram,
    }
}
