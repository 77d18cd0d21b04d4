//! Average Directional Index with its directional indicators.
//!
//! TR  = max(H-L, |H-Cp|, |L-Cp|)  (H-L on the first bar)
//! +DM = up if up > down and up > 0, else 0   where up = H - Hp, down = Lp - L
//! -DM = down if down > up and down > 0, else 0
//! ±DI = 100 * mean_n(±DM) / mean_n(TR)
//! DX  = 100 * |+DI - -DI| / (+DI + -DI)
//! ADX = mean_n(DX)
//!
//! Smoothing is a simple rolling mean. Warmup: DI needs n bars, ADX 2n-1.

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{rolling_mean, zip_with};

#[derive(Debug, Clone)]
pub struct AdxOutput {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
}

/// True range per bar; the first bar has no prior close and uses H - L.
pub(crate) fn true_range(series: &PriceSeries) -> Vec<f64> {
    let bars = series.bars();
    bars.iter()
        .enumerate()
        .map(|(i, bar)| match i {
            0 => bar.range(),
            _ => bar.true_range(bars[i - 1].close),
        })
        .collect()
}

pub fn calculate_adx(series: &PriceSeries, period: usize) -> AdxOutput {
    let bars = series.bars();
    let mut plus_dm = vec![0.0; bars.len()];
    let mut minus_dm = vec![0.0; bars.len()];
    for i in 1..bars.len() {
        let up = bars[i].high - bars[i - 1].high;
        let down = bars[i - 1].low - bars[i].low;
        if up > down && up > 0.0 {
            plus_dm[i] = up;
        }
        if down > up && down > 0.0 {
            minus_dm[i] = down;
        }
    }

    let atr = rolling_mean(&true_range(series), period);
    let plus_di = zip_with(&rolling_mean(&plus_dm, period), &atr, |dm, tr| 100.0 * dm / tr);
    let minus_di = zip_with(&rolling_mean(&minus_dm, period), &atr, |dm, tr| 100.0 * dm / tr);
    let dx = zip_with(&plus_di, &minus_di, |p, m| 100.0 * (p - m).abs() / (p + m));
    let adx = rolling_mean(&dx, period);

    AdxOutput {
        adx,
        plus_di,
        minus_di,
    }
}
