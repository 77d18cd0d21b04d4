//! DeMarker indicator.
//!
//! DeMax = max(H - Hp, 0), DeMin = max(Lp - L, 0), both 0 on the first bar.
//! DeM = ΣDeMax / (ΣDeMax + ΣDeMin) over n bars, in [0, 1].

use crate::domain::price_series::PriceSeries;
use crate::domain::series::rolling_sum;

pub fn calculate_demarker(series: &PriceSeries, period: usize) -> Vec<f64> {
    let bars = series.bars();
    let mut de_max = vec![0.0; bars.len()];
    let mut de_min = vec![0.0; bars.len()];
    for i in 1..bars.len() {
        de_max[i] = (bars[i].high - bars[i - 1].high).max(0.0);
        de_min[i] = (bars[i - 1].low - bars[i].low).max(0.0);
    }
    let sum_max = rolling_sum(&de_max, period);
    let sum_min = rolling_sum(&de_min, period);
    sum_max
        .iter()
        .zip(&sum_min)
        .map(|(mx, mn)| mx / (mx + mn))
        .collect()
}
