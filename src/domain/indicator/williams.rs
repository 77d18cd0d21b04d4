//! Williams %R = -100 * (HH_n - C) / (HH_n - LL_n), in [-100, 0].

use crate::domain::price_series::PriceSeries;
use crate::domain::series::{rolling_max, rolling_min};

pub fn calculate_williams_r(series: &PriceSeries, period: usize) -> Vec<f64> {
    let closes = series.closes();
    let hh = rolling_max(&series.highs(), period);
    let ll = rolling_min(&series.lows(), period);
    (0..closes.len())
        .map(|i| -100.0 * (hh[i] - closes[i]) / (hh[i] - ll[i]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::test_support::series_from_hlc;
    use approx::assert_relative_eq;

    #[test]
    fn close_at_high_is_zero_and_at_low_is_minus_100() {
        let series = series_from_hlc(&[(10.0, 0.0, 5.0), (10.0, 0.0, 10.0), (10.0, 0.0, 0.0)]);
        let wr = calculate_williams_r(&series, 2);
        assert!(wr[0].is_nan());
        assert_relative_eq!(wr[1], 0.0);
        assert_relative_eq!(wr[2], -100.0);
    }
}
