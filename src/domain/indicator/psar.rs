//! Parabolic Stop and Reverse.
//!
//! The one indicator computed by an explicit bar-by-bar loop. State carried
//! across bars: trend, extreme point (EP), acceleration factor (AF) and the
//! prior SAR.
//!
//! - Bar 0: trend is up if C[1] > C[0], else down. SAR = L[0] (up) or H[0]
//!   (down); EP = H[0] (up) or L[0] (down).
//! - Each later bar: SAR = prior + AF * (EP - prior), clamped so it never
//!   rises above the prior two lows (up) or falls below the prior two highs
//!   (down).
//! - If the bar penetrates the projected SAR the trend flips: SAR = prior EP,
//!   EP = the bar's extreme, AF = af_start.
//! - Otherwise a new extreme moves EP and steps AF by af_increment up to af_max.
//!
//! Fewer than two bars produce an all-NaN series.

use crate::domain::price_series::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PsarParams {
    pub af_start: f64,
    pub af_increment: f64,
    pub af_max: f64,
}

impl Default for PsarParams {
    fn default() -> Self {
        Self {
            af_start: 0.02,
            af_increment: 0.02,
            af_max: 0.2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PsarOutput {
    pub sar: Vec<f64>,
    pub trend: Vec<Option<Trend>>,
}

pub fn calculate_psar(series: &PriceSeries, params: PsarParams) -> PsarOutput {
    let bars = series.bars();
    let mut sar = vec![f64::NAN; bars.len()];
    let mut trend = vec![None; bars.len()];
    if bars.len() < 2 {
        return PsarOutput { sar, trend };
    }

    let mut state = if bars[1].close > bars[0].close {
        Trend::Up
    } else {
        Trend::Down
    };
    let (mut ep, seed) = match state {
        Trend::Up => (bars[0].high, bars[0].low),
        Trend::Down => (bars[0].low, bars[0].high),
    };
    let mut af = params.af_start;
    sar[0] = seed;
    trend[0] = Some(state);

    for i in 1..bars.len() {
        let prior = sar[i - 1];
        let bar = &bars[i];
        let mut next = prior + af * (ep - prior);

        match state {
            Trend::Up => {
                next = next.min(bars[i - 1].low);
                if i >= 2 {
                    next = next.min(bars[i - 2].low);
                }
                if bar.low < next {
                    state = Trend::Down;
                    next = ep;
                    ep = bar.low;
                    af = params.af_start;
                } else if bar.high > ep {
                    ep = bar.high;
                    af = (af + params.af_increment).min(params.af_max);
                }
            }
            Trend::Down => {
                next = next.max(bars[i - 1].high);
                if i >= 2 {
                    next = next.max(bars[i - 2].high);
                }
                if bar.high > next {
                    state = Trend::Up;
                    next = ep;
                    ep = bar.high;
                    af = params.af_start;
                } else if bar.low < ep {
                    ep = bar.low;
                    af = (af + params.af_increment).min(params.af_max);
                }
            }
        }

        sar[i] = next;
        trend[i] = Some(state);
    }

    PsarOutput { sar, trend }
}
