//! Accumulation/Distribution Line.
//!
//! MFM = ((C-L) - (H-C)) / (H-L), 0 when H == L
//! ADL = running sum of MFM * volume over the whole series
//! ADL_MA = rolling mean of ADL over n bars

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{cumsum, rolling_mean};

#[derive(Debug, Clone)]
pub struct AdlOutput {
    pub adl: Vec<f64>,
    pub average: Vec<f64>,
}

pub fn calculate_adl(series: &PriceSeries, period: usize) -> AdlOutput {
    let money_flow: Vec<f64> = series
        .bars()
        .iter()
        .map(|b| b.money_flow_multiplier() * b.volume as f64)
        .collect();
    let adl = cumsum(&money_flow);
    let average = rolling_mean(&adl, period);
    AdlOutput { adl, average }
}
