//! Classic pivot points from the prior bar.
//!
//! P  = (Hp + Lp + Cp) / 3
//! R1 = scale * P - Lp
//! S1 = scale * P - Hp
//!
//! The first bar has no prior bar and is NaN.

use crate::domain::price_series::PriceSeries;

#[derive(Debug, Clone)]
pub struct PivotOutput {
    pub pivot: Vec<f64>,
    pub r1: Vec<f64>,
    pub s1: Vec<f64>,
}

pub fn calculate_pivot(series: &PriceSeries, scale: f64) -> PivotOutput {
    let bars = series.bars();
    let mut pivot = vec![f64::NAN; bars.len()];
    let mut r1 = vec![f64::NAN; bars.len()];
    let mut s1 = vec![f64::NAN; bars.len()];

    for i in 1..bars.len() {
        let prev = &bars[i - 1];
        let p = prev.typical_price();
        pivot[i] = p;
        r1[i] = scale * p - prev.low;
        s1[i] = scale * p - prev.high;
    }

    PivotOutput { pivot, r1, s1 }
}
