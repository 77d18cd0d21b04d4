//! Technical indicator implementations.
//!
//! - `IndicatorType`: indicator identity + parameters (serves as HashMap key)
//! - `IndicatorField`: one named output of a multi-output indicator
//!
//! Each submodule computes one indicator into a typed output record. Records
//! are flattened to named columns only by [`IndicatorType::compute`].

pub mod adl;
pub mod adr;
pub mod adx;
pub mod aroon;
pub mod bollinger;
pub mod cci;
pub mod cmo;
pub mod demarker;
pub mod donchian;
pub mod ema;
pub mod ichimoku;
pub mod keltner;
pub mod macd;
pub mod pivot;
pub mod psar;
pub mod psy;
pub mod rsi;
pub mod sma;
pub mod stochastic;
pub mod tsi;
pub mod williams;

use crate::domain::price_series::PriceSeries;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RsiSmoothing {
    #[default]
    Simple,
    Wilder,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Ema(usize),
    Tsi {
        short: usize,
        long: usize,
        signal: usize,
    },
    Macd {
        short: usize,
        long: usize,
        signal: usize,
    },
    Psar {
        af_start_x1000: u32,
        af_increment_x1000: u32,
        af_max_x1000: u32,
    },
    Adx(usize),
    Aroon(usize),
    Adl(usize),
    Adr(usize),
    Ichimoku {
        tenkan: usize,
        kijun: usize,
        senkou: usize,
    },
    Keltner {
        period: usize,
        multiplier_x100: u32,
    },
    Rsi {
        period: usize,
        smoothing: RsiSmoothing,
    },
    Bollinger {
        period: usize,
        stddev_mult_x100: u32,
    },
    Cci(usize),
    Stochastic {
        k_period: usize,
        d_period: usize,
    },
    Williams(usize),
    Cmo(usize),
    DeMarker(usize),
    Donchian(usize),
    Pivot {
        scale_x100: u32,
    },
    Psy(usize),
    Npsy(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorField {
    Value,
    Signal,
    Histogram,
    PlusDi,
    MinusDi,
    Up,
    Down,
    Oscillator,
    Average,
    Tenkan,
    Kijun,
    SenkouA,
    SenkouB,
    Chikou,
    Upper,
    Middle,
    Lower,
    K,
    D,
    Pivot,
    R1,
    S1,
}

/// Fixed-point scale of the PSAR acceleration factors.
pub const AF_SCALE: f64 = 1000.0;
/// Fixed-point scale of multipliers (Keltner, Bollinger, pivot).
pub const MULTIPLIER_SCALE: f64 = 100.0;

/// Convert a fractional parameter to its hashable fixed-point form.
pub fn to_fixed(value: f64, scale: f64) -> u32 {
    (value * scale).round() as u32
}

/// True when `value` converts to fixed point without rounding.
pub fn fits_fixed(value: f64, scale: f64) -> bool {
    let scaled = value * scale;
    scaled.is_finite() && scaled >= 0.0 && (scaled - scaled.round()).abs() < 1e-6
}

fn from_fixed(value: u32, scale: f64) -> f64 {
    value as f64 / scale
}

impl IndicatorType {
    /// Outputs in column order.
    pub fn fields(&self) -> &'static [IndicatorField] {
        use IndicatorField as F;
        match self {
            IndicatorType::Tsi { .. } => &[F::Value, F::Signal],
            IndicatorType::Macd { .. } => &[F::Value, F::Signal, F::Histogram],
            IndicatorType::Adx(_) => &[F::Value, F::PlusDi, F::MinusDi],
            IndicatorType::Aroon(_) => &[F::Up, F::Down, F::Oscillator],
            IndicatorType::Adl(_) => &[F::Value, F::Average],
            IndicatorType::Ichimoku { .. } => {
                &[F::Tenkan, F::Kijun, F::SenkouA, F::SenkouB, F::Chikou]
            }
            IndicatorType::Keltner { .. }
            | IndicatorType::Bollinger { .. }
            | IndicatorType::Donchian(_) => &[F::Middle, F::Upper, F::Lower],
            IndicatorType::Stochastic { .. } => &[F::K, F::D],
            IndicatorType::Pivot { .. } => &[F::Pivot, F::R1, F::S1],
            _ => &[F::Value],
        }
    }

    /// Column name of one output, encoding identity and parameters.
    pub fn column_name(&self, field: IndicatorField) -> String {
        use IndicatorField as F;
        match (self, field) {
            (IndicatorType::Sma(n), _) => format!("SMA({n})"),
            (IndicatorType::Ema(n), _) => format!("EMA({n})"),
            (IndicatorType::Tsi { short, long, .. }, F::Value) => format!("TSI({short},{long})"),
            (IndicatorType::Tsi { short, long, signal }, _) => {
                format!("TSI_SIGNAL({short},{long},{signal})")
            }
            (IndicatorType::Macd { short, long, .. }, F::Value) => format!("MACD({short},{long})"),
            (IndicatorType::Macd { short, long, signal }, F::Histogram) => {
                format!("MACD_HIST({short},{long},{signal})")
            }
            (IndicatorType::Macd { short, long, signal }, _) => {
                format!("MACD_SIGNAL({short},{long},{signal})")
            }
            (IndicatorType::Psar { .. }, _) => self.to_string(),
            (IndicatorType::Adx(n), F::PlusDi) => format!("PLUS_DI({n})"),
            (IndicatorType::Adx(n), F::MinusDi) => format!("MINUS_DI({n})"),
            (IndicatorType::Adx(n), _) => format!("ADX({n})"),
            (IndicatorType::Aroon(n), F::Up) => format!("AROON_UP({n})"),
            (IndicatorType::Aroon(n), F::Down) => format!("AROON_DOWN({n})"),
            (IndicatorType::Aroon(n), _) => format!("AROON_OSC({n})"),
            (IndicatorType::Adl(n), F::Average) => format!("ADL_MA({n})"),
            (IndicatorType::Adl(n), _) => format!("ADL({n})"),
            (IndicatorType::Adr(n), _) => format!("ADR({n})"),
            (IndicatorType::Ichimoku { tenkan, .. }, F::Tenkan) => {
                format!("ICHIMOKU_TENKAN({tenkan})")
            }
            (IndicatorType::Ichimoku { tenkan, kijun, .. }, F::SenkouA) => {
                format!("ICHIMOKU_SENKOU_A({tenkan},{kijun})")
            }
            (IndicatorType::Ichimoku { kijun, senkou, .. }, F::SenkouB) => {
                format!("ICHIMOKU_SENKOU_B({senkou},{kijun})")
            }
            (IndicatorType::Ichimoku { kijun, .. }, F::Chikou) => {
                format!("ICHIMOKU_CHIKOU({kijun})")
            }
            (IndicatorType::Ichimoku { kijun, .. }, _) => format!("ICHIMOKU_KIJUN({kijun})"),
            (IndicatorType::Keltner { period, .. }, f) => {
                format!("KELTNER_{}({period})", band_suffix(f))
            }
            (IndicatorType::Rsi { period, .. }, _) => format!("RSI({period})"),
            (IndicatorType::Bollinger { period, .. }, f) => {
                format!("BB_{}({period})", band_suffix(f))
            }
            (IndicatorType::Cci(n), _) => format!("CCI({n})"),
            (IndicatorType::Stochastic { k_period, .. }, F::K) => format!("STOCH_K({k_period})"),
            (IndicatorType::Stochastic { k_period, d_period }, _) => {
                format!("STOCH_D({k_period},{d_period})")
            }
            (IndicatorType::Williams(n), _) => format!("WILLIAMS_R({n})"),
            (IndicatorType::Cmo(n), _) => format!("CMO({n})"),
            (IndicatorType::DeMarker(n), _) => format!("DEMARKER({n})"),
            (IndicatorType::Donchian(n), f) => format!("DONCHIAN_{}({n})", band_suffix(f)),
            (IndicatorType::Pivot { scale_x100 }, F::R1) => {
                format!("PIVOT_R1({})", from_fixed(*scale_x100, MULTIPLIER_SCALE))
            }
            (IndicatorType::Pivot { scale_x100 }, F::S1) => {
                format!("PIVOT_S1({})", from_fixed(*scale_x100, MULTIPLIER_SCALE))
            }
            (IndicatorType::Pivot { .. }, _) => "PIVOT".to_string(),
            (IndicatorType::Psy(n), _) => format!("PSY({n})"),
            (IndicatorType::Npsy(n), _) => format!("NPSY({n})"),
        }
    }

    /// All column names in the order `compute` produces them.
    pub fn column_names(&self) -> Vec<String> {
        self.fields()
            .iter()
            .map(|&f| self.column_name(f))
            .collect()
    }

    /// Bars needed before every output column has a defined value.
    pub fn required_bars(&self) -> usize {
        match self {
            IndicatorType::Ema(_) | IndicatorType::Macd { .. } => 1,
            IndicatorType::Tsi { .. } | IndicatorType::Psar { .. } => 2,
            IndicatorType::Pivot { .. } => 2,
            IndicatorType::Adx(n) => (2 * n).saturating_sub(1).max(1),
            // the spans are the widest window plotted `kijun` bars ahead
            IndicatorType::Ichimoku {
                tenkan,
                kijun,
                senkou,
            } => tenkan.max(kijun).max(senkou) + kijun,
            IndicatorType::Rsi { period, .. } => period + 1,
            IndicatorType::Cmo(n) => n + 1,
            IndicatorType::Stochastic { k_period, d_period } => {
                (k_period + d_period).saturating_sub(1)
            }
            IndicatorType::Sma(n)
            | IndicatorType::Aroon(n)
            | IndicatorType::Adl(n)
            | IndicatorType::Adr(n)
            | IndicatorType::Cci(n)
            | IndicatorType::Williams(n)
            | IndicatorType::DeMarker(n)
            | IndicatorType::Donchian(n)
            | IndicatorType::Psy(n)
            | IndicatorType::Npsy(n) => *n,
            IndicatorType::Keltner { period, .. } | IndicatorType::Bollinger { period, .. } => {
                *period
            }
        }
    }

    /// Compute every output of this indicator over `series`, in `fields()` order.
    pub fn compute(&self, series: &PriceSeries) -> Vec<Vec<f64>> {
        match self {
            IndicatorType::Sma(n) => vec![sma::calculate_sma(series, *n)],
            IndicatorType::Ema(n) => vec![ema::calculate_ema(series, *n)],
            IndicatorType::Tsi { short, long, signal } => {
                let out = tsi::calculate_tsi(series, *short, *long, *signal);
                vec![out.tsi, out.signal]
            }
            IndicatorType::Macd { short, long, signal } => {
                let out = macd::calculate_macd(series, *short, *long, *signal);
                vec![out.line, out.signal, out.histogram]
            }
            IndicatorType::Psar {
                af_start_x1000,
                af_increment_x1000,
                af_max_x1000,
            } => {
                let params = psar::PsarParams {
                    af_start: from_fixed(*af_start_x1000, AF_SCALE),
                    af_increment: from_fixed(*af_increment_x1000, AF_SCALE),
                    af_max: from_fixed(*af_max_x1000, AF_SCALE),
                };
                vec![psar::calculate_psar(series, params).sar]
            }
            IndicatorType::Adx(n) => {
                let out = adx::calculate_adx(series, *n);
                vec![out.adx, out.plus_di, out.minus_di]
            }
            IndicatorType::Aroon(n) => {
                let out = aroon::calculate_aroon(series, *n);
                vec![out.up, out.down, out.oscillator]
            }
            IndicatorType::Adl(n) => {
                let out = adl::calculate_adl(series, *n);
                vec![out.adl, out.average]
            }
            IndicatorType::Adr(n) => vec![adr::calculate_adr(series, *n)],
            IndicatorType::Ichimoku {
                tenkan,
                kijun,
                senkou,
            } => {
                let out = ichimoku::calculate_ichimoku(series, *tenkan, *kijun, *senkou);
                vec![out.tenkan, out.kijun, out.senkou_a, out.senkou_b, out.chikou]
            }
            IndicatorType::Keltner {
                period,
                multiplier_x100,
            } => {
                let multiplier = from_fixed(*multiplier_x100, MULTIPLIER_SCALE);
                let out = keltner::calculate_keltner(series, *period, multiplier);
                vec![out.middle, out.upper, out.lower]
            }
            IndicatorType::Rsi { period, smoothing } => {
                vec![rsi::calculate_rsi(series, *period, *smoothing)]
            }
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let out = bollinger::calculate_bollinger(
                    series,
                    *period,
                    from_fixed(*stddev_mult_x100, MULTIPLIER_SCALE),
                );
                vec![out.middle, out.upper, out.lower]
            }
            IndicatorType::Cci(n) => vec![cci::calculate_cci(series, *n)],
            IndicatorType::Stochastic { k_period, d_period } => {
                let out = stochastic::calculate_stochastic(series, *k_period, *d_period);
                vec![out.k, out.d]
            }
            IndicatorType::Williams(n) => vec![williams::calculate_williams_r(series, *n)],
            IndicatorType::Cmo(n) => vec![cmo::calculate_cmo(series, *n)],
            IndicatorType::DeMarker(n) => vec![demarker::calculate_demarker(series, *n)],
            IndicatorType::Donchian(n) => {
                let out = donchian::calculate_donchian(series, *n);
                vec![out.middle, out.upper, out.lower]
            }
            IndicatorType::Pivot { scale_x100 } => {
                let scale = from_fixed(*scale_x100, MULTIPLIER_SCALE);
                let out = pivot::calculate_pivot(series, scale);
                vec![out.pivot, out.r1, out.s1]
            }
            IndicatorType::Psy(n) => vec![psy::calculate_psy(series, *n)],
            IndicatorType::Npsy(n) => vec![psy::calculate_npsy(series, *n)],
        }
    }
}

fn band_suffix(field: IndicatorField) -> &'static str {
    match field {
        IndicatorField::Upper => "UP",
        IndicatorField::Lower => "DOWN",
        _ => "MID",
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(n) => write!(f, "SMA({n})"),
            IndicatorType::Ema(n) => write!(f, "EMA({n})"),
            IndicatorType::Tsi { short, long, signal } => {
                write!(f, "TSI({short},{long},{signal})")
            }
            IndicatorType::Macd { short, long, signal } => {
                write!(f, "MACD({short},{long},{signal})")
            }
            IndicatorType::Psar {
                af_start_x1000,
                af_increment_x1000,
                af_max_x1000,
            } => write!(
                f,
                "PSAR({},{},{})",
                from_fixed(*af_start_x1000, AF_SCALE),
                from_fixed(*af_increment_x1000, AF_SCALE),
                from_fixed(*af_max_x1000, AF_SCALE)
            ),
            IndicatorType::Adx(n) => write!(f, "ADX({n})"),
            IndicatorType::Aroon(n) => write!(f, "AROON({n})"),
            IndicatorType::Adl(n) => write!(f, "ADL({n})"),
            IndicatorType::Adr(n) => write!(f, "ADR({n})"),
            IndicatorType::Ichimoku {
                tenkan,
                kijun,
                senkou,
            } => write!(f, "ICHIMOKU({tenkan},{kijun},{senkou})"),
            IndicatorType::Keltner {
                period,
                multiplier_x100,
            } => {
                let multiplier = from_fixed(*multiplier_x100, MULTIPLIER_SCALE);
                write!(f, "KELTNER({period},{multiplier})")
            }
            IndicatorType::Rsi { period, .. } => write!(f, "RSI({period})"),
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let stddev = from_fixed(*stddev_mult_x100, MULTIPLIER_SCALE);
                write!(f, "BB({period},{stddev})")
            }
            IndicatorType::Cci(n) => write!(f, "CCI({n})"),
            IndicatorType::Stochastic { k_period, d_period } => {
                write!(f, "STOCH({k_period},{d_period})")
            }
            IndicatorType::Williams(n) => write!(f, "WILLIAMS_R({n})"),
            IndicatorType::Cmo(n) => write!(f, "CMO({n})"),
            IndicatorType::DeMarker(n) => write!(f, "DEMARKER({n})"),
            IndicatorType::Donchian(n) => write!(f, "DONCHIAN({n})"),
            IndicatorType::Pivot { scale_x100 } => {
                write!(f, "PIVOT({})", from_fixed(*scale_x100, MULTIPLIER_SCALE))
            }
            IndicatorType::Psy(n) => write!(f, "PSY({n})"),
            IndicatorType::Npsy(n) => write!(f, "NPSY({n})"),
        }
    }
}
