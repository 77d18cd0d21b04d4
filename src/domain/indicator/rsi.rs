//! RSI (Relative Strength Index).
//!
//! Gains and losses come from close-to-close changes. Averages are either:
//! - Simple: rolling mean over n changes (default)
//! - Wilder: seeded with the simple mean of the first n changes, then
//!   avg = (prev_avg * (n-1) + current) / n
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss)), evaluated in plain
//! float arithmetic: a flat window (0/0) is NaN, a window with no losses is 100.
//!
//! Warmup: first n bars are NaN (n changes need n+1 closes).

use crate::domain::indicator::RsiSmoothing;
use crate::domain::price_series::PriceSeries;
use crate::domain::series::{diff, rolling_mean, zip_with};

pub fn calculate_rsi(series: &PriceSeries, period: usize, smoothing: RsiSmoothing) -> Vec<f64> {
    let changes = diff(&series.closes());
    let gains: Vec<f64> = changes.iter().map(|&c| gain(c)).collect();
    let losses: Vec<f64> = changes.iter().map(|&c| gain(-c)).collect();

    let (avg_gain, avg_loss) = match smoothing {
        RsiSmoothing::Simple => (rolling_mean(&gains, period), rolling_mean(&losses, period)),
        RsiSmoothing::Wilder => (wilder(&gains, period), wilder(&losses, period)),
    };

    zip_with(&avg_gain, &avg_loss, |g, l| 100.0 - 100.0 / (1.0 + g / l))
}

fn gain(change: f64) -> f64 {
    if change.is_nan() {
        f64::NAN
    } else {
        change.max(0.0)
    }
}

/// Wilder smoothing over a column whose first element is the NaN from `diff`.
fn wilder(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }
    let n = period as f64;
    let mut avg = values[1..=period].iter().sum::<f64>() / n;
    out[period] = avg;
    for i in (period + 1)..values.len() {
        avg = (avg * (n - 1.0) + values[i]) / n;
        out[i] = avg;
    }
    out
}
