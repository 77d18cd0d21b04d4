//! Typed run configuration: engine options, indicator parameters and signal
//! thresholds, with defaults and loading from a [`ConfigPort`].

use crate::domain::config_validation::{validate_indicator_config, validate_thresholds};
use crate::domain::error::Core16Error;
use crate::domain::indicator::macd::{DEFAULT_LONG, DEFAULT_SHORT, DEFAULT_SIGNAL};
use crate::domain::indicator::psar::PsarParams;
use crate::domain::indicator::{AF_SCALE, IndicatorType, MULTIPLIER_SCALE, RsiSmoothing, to_fixed};
use crate::domain::resample::Resample;
use crate::ports::config_port::ConfigPort;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub engine: EngineConfig,
    pub indicators: IndicatorConfig,
    pub thresholds: SignalThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub resample: Resample,
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resample: Resample::Daily,
            parallel: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorConfig {
    pub sma_periods: Vec<usize>,
    pub ema_periods: Vec<usize>,
    pub tsi_short: usize,
    pub tsi_long: usize,
    pub tsi_signal: usize,
    pub macd_short: usize,
    pub macd_long: usize,
    pub macd_signal: usize,
    pub psar: PsarParams,
    pub adx_period: usize,
    pub aroon_period: usize,
    pub adl_period: usize,
    pub adr_period: usize,
    pub ichimoku_tenkan: usize,
    pub ichimoku_kijun: usize,
    pub ichimoku_senkou: usize,
    pub keltner_period: usize,
    pub keltner_multiplier: f64,
    pub rsi_period: usize,
    pub rsi_smoothing: RsiSmoothing,
    pub bollinger_period: usize,
    pub bollinger_stddev: f64,
    pub cci_period: usize,
    pub stochastic_k: usize,
    pub stochastic_d: usize,
    pub williams_period: usize,
    pub cmo_period: usize,
    pub demarker_period: usize,
    pub donchian_period: usize,
    pub pivot_scale: f64,
    pub psy_period: usize,
    pub npsy_period: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_periods: vec![20, 50],
            ema_periods: vec![20, 50],
            tsi_short: 13,
            tsi_long: 25,
            tsi_signal: 13,
            macd_short: DEFAULT_SHORT,
            macd_long: DEFAULT_LONG,
            macd_signal: DEFAULT_SIGNAL,
            psar: PsarParams::default(),
            adx_period: 14,
            aroon_period: 14,
            adl_period: 20,
            adr_period: 20,
            ichimoku_tenkan: 9,
            ichimoku_kijun: 26,
            ichimoku_senkou: 52,
            keltner_period: 20,
            keltner_multiplier: 2.0,
            rsi_period: 14,
            rsi_smoothing: RsiSmoothing::Simple,
            bollinger_period: 20,
            bollinger_stddev: 2.0,
            cci_period: 20,
            stochastic_k: 14,
            stochastic_d: 3,
            williams_period: 14,
            cmo_period: 14,
            demarker_period: 14,
            donchian_period: 20,
            pivot_scale: 2.0,
            psy_period: 12,
            npsy_period: 12,
        }
    }
}

impl IndicatorConfig {
    /// Every configured indicator, momentum family first, without duplicates.
    pub fn indicators(&self) -> Vec<IndicatorType> {
        let mut out: Vec<IndicatorType> = Vec::new();
        let mut push = |ind: IndicatorType| {
            if !out.contains(&ind) {
                out.push(ind);
            }
        };

        for &n in &self.sma_periods {
            push(IndicatorType::Sma(n));
        }
        for &n in &self.ema_periods {
            push(IndicatorType::Ema(n));
        }
        push(IndicatorType::Tsi {
            short: self.tsi_short,
            long: self.tsi_long,
            signal: self.tsi_signal,
        });
        push(IndicatorType::Macd {
            short: self.macd_short,
            long: self.macd_long,
            signal: self.macd_signal,
        });
        push(IndicatorType::Psar {
            af_start_x1000: to_fixed(self.psar.af_start, AF_SCALE),
            af_increment_x1000: to_fixed(self.psar.af_increment, AF_SCALE),
            af_max_x1000: to_fixed(self.psar.af_max, AF_SCALE),
        });
        push(IndicatorType::Adx(self.adx_period));
        push(IndicatorType::Aroon(self.aroon_period));
        push(IndicatorType::Adl(self.adl_period));
        push(IndicatorType::Adr(self.adr_period));
        push(IndicatorType::Ichimoku {
            tenkan: self.ichimoku_tenkan,
            kijun: self.ichimoku_kijun,
            senkou: self.ichimoku_senkou,
        });
        push(IndicatorType::Keltner {
            period: self.keltner_period,
            multiplier_x100: to_fixed(self.keltner_multiplier, MULTIPLIER_SCALE),
        });

        push(IndicatorType::Rsi {
            period: self.rsi_period,
            smoothing: self.rsi_smoothing,
        });
        push(IndicatorType::Bollinger {
            period: self.bollinger_period,
            stddev_mult_x100: to_fixed(self.bollinger_stddev, MULTIPLIER_SCALE),
        });
        push(IndicatorType::Cci(self.cci_period));
        push(IndicatorType::Stochastic {
            k_period: self.stochastic_k,
            d_period: self.stochastic_d,
        });
        push(IndicatorType::Williams(self.williams_period));
        push(IndicatorType::Cmo(self.cmo_period));
        push(IndicatorType::DeMarker(self.demarker_period));
        push(IndicatorType::Donchian(self.donchian_period));
        push(IndicatorType::Pivot {
            scale_x100: to_fixed(self.pivot_scale, MULTIPLIER_SCALE),
        });
        push(IndicatorType::Psy(self.psy_period));
        push(IndicatorType::Npsy(self.npsy_period));
        out
    }
}

/// Oversold / overbought pair for an oscillator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub oversold: f64,
    pub overbought: f64,
}

impl Band {
    pub const fn new(oversold: f64, overbought: f64) -> Self {
        Self {
            oversold,
            overbought,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalThresholds {
    pub adx_trend: f64,
    pub adr_k: f64,
    pub rsi: Band,
    pub cci: Band,
    pub stochastic: Band,
    pub williams: Band,
    pub cmo: Band,
    pub demarker: Band,
    pub psy: Band,
    pub npsy: Band,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            adx_trend: 25.0,
            adr_k: 1.5,
            rsi: Band::new(30.0, 70.0),
            cci: Band::new(-100.0, 100.0),
            stochastic: Band::new(20.0, 80.0),
            williams: Band::new(-80.0, -20.0),
            cmo: Band::new(-50.0, 50.0),
            demarker: Band::new(0.2, 0.8),
            psy: Band::new(30.0, 70.0),
            npsy: Band::new(-40.0, 40.0),
        }
    }
}

impl Config {
    /// Read every section, falling back to defaults for absent keys, then validate.
    pub fn from_port(port: &dyn ConfigPort) -> Result<Self, Core16Error> {
        let config = Self {
            engine: read_engine(port)?,
            indicators: read_indicators(port)?,
            thresholds: read_thresholds(port)?,
        };
        validate_indicator_config(&config.indicators)?;
        validate_thresholds(&config.thresholds)?;
        Ok(config)
    }
}

fn read_engine(port: &dyn ConfigPort) -> Result<EngineConfig, Core16Error> {
    let defaults = EngineConfig::default();
    let resample = match port.get_string("engine", "resample") {
        Some(s) => s
            .parse::<Resample>()
            .map_err(|reason| Core16Error::invalid("engine", "resample", reason))?,
        None => defaults.resample,
    };
    Ok(EngineConfig {
        resample,
        parallel: read_flag(port, "engine", "parallel", defaults.parallel)?,
    })
}

fn read_flag(
    port: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: bool,
) -> Result<bool, Core16Error> {
    let Some(raw) = port.get_string(section, key) else {
        return Ok(default);
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(Core16Error::invalid(
            section,
            key,
            format!("'{raw}' is not a boolean"),
        )),
    }
}

fn read_period(
    port: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: usize,
) -> Result<usize, Core16Error> {
    let Some(raw) = port.get_string(section, key) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Core16Error::invalid(
            section,
            key,
            format!("'{raw}' is not a positive integer"),
        )),
    }
}

fn read_number(
    port: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, Core16Error> {
    let Some(raw) = port.get_string(section, key) else {
        return Ok(default);
    };
    raw.trim()
        .parse::<f64>()
        .map_err(|_| Core16Error::invalid(section, key, format!("'{raw}' is not a number")))
}

fn read_periods(
    port: &dyn ConfigPort,
    section: &str,
    default: &[usize],
) -> Result<Vec<usize>, Core16Error> {
    let Some(items) = port.get_list(section, "periods") else {
        return Ok(default.to_vec());
    };
    if items.is_empty() {
        return Err(Core16Error::invalid(section, "periods", "at least one period is required"));
    }
    items
        .iter()
        .map(|item| match item.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(Core16Error::invalid(
                section,
                "periods",
                format!("'{item}' is not a positive integer"),
            )),
        })
        .collect()
}

fn read_indicators(port: &dyn ConfigPort) -> Result<IndicatorConfig, Core16Error> {
    let d = IndicatorConfig::default();
    let rsi_smoothing = match port.get_string("rsi", "smoothing") {
        None => d.rsi_smoothing,
        Some(s) => match s.trim().to_lowercase().as_str() {
            "simple" => RsiSmoothing::Simple,
            "wilder" | "exponential" => RsiSmoothing::Wilder,
            other => {
                return Err(Core16Error::invalid(
                    "rsi",
                    "smoothing",
                    format!("unknown smoothing '{other}' (expected simple or wilder)"),
                ));
            }
        },
    };

    Ok(IndicatorConfig {
        sma_periods: read_periods(port, "sma", &d.sma_periods)?,
        ema_periods: read_periods(port, "ema", &d.ema_periods)?,
        tsi_short: read_period(port, "tsi", "short", d.tsi_short)?,
        tsi_long: read_period(port, "tsi", "long", d.tsi_long)?,
        tsi_signal: read_period(port, "tsi", "signal", d.tsi_signal)?,
        macd_short: read_period(port, "macd", "short", d.macd_short)?,
        macd_long: read_period(port, "macd", "long", d.macd_long)?,
        macd_signal: read_period(port, "macd", "signal", d.macd_signal)?,
        psar: PsarParams {
            af_start: read_number(port, "psar", "af_start", d.psar.af_start)?,
            af_increment: read_number(port, "psar", "af_increment", d.psar.af_increment)?,
            af_max: read_number(port, "psar", "af_max", d.psar.af_max)?,
        },
        adx_period: read_period(port, "adx", "period", d.adx_period)?,
        aroon_period: read_period(port, "aroon", "period", d.aroon_period)?,
        adl_period: read_period(port, "adl", "period", d.adl_period)?,
        adr_period: read_period(port, "adr", "period", d.adr_period)?,
        ichimoku_tenkan: read_period(port, "ichimoku", "tenkan", d.ichimoku_tenkan)?,
        ichimoku_kijun: read_period(port, "ichimoku", "kijun", d.ichimoku_kijun)?,
        ichimoku_senkou: read_period(port, "ichimoku", "senkou", d.ichimoku_senkou)?,
        keltner_period: read_period(port, "keltner", "period", d.keltner_period)?,
        keltner_multiplier: read_number(port, "keltner", "multiplier", d.keltner_multiplier)?,
        rsi_period: read_period(port, "rsi", "period", d.rsi_period)?,
        rsi_smoothing,
        bollinger_period: read_period(port, "bollinger", "period", d.bollinger_period)?,
        bollinger_stddev: read_number(port, "bollinger", "stddev", d.bollinger_stddev)?,
        cci_period: read_period(port, "cci", "period", d.cci_period)?,
        stochastic_k: read_period(port, "stochastic", "k_period", d.stochastic_k)?,
        stochastic_d: read_period(port, "stochastic", "d_period", d.stochastic_d)?,
        williams_period: read_period(port, "williams", "period", d.williams_period)?,
        cmo_period: read_period(port, "cmo", "period", d.cmo_period)?,
        demarker_period: read_period(port, "demarker", "period", d.demarker_period)?,
        donchian_period: read_period(port, "donchian", "period", d.donchian_period)?,
        pivot_scale: read_number(port, "pivot", "scale", d.pivot_scale)?,
        psy_period: read_period(port, "psy", "period", d.psy_period)?,
        npsy_period: read_period(port, "npsy", "period", d.npsy_period)?,
    })
}

fn read_band(port: &dyn ConfigPort, name: &str, default: Band) -> Result<Band, Core16Error> {
    let oversold_key = format!("{name}_oversold");
    let overbought_key = format!("{name}_overbought");
    Ok(Band {
        oversold: read_number(port, "thresholds", &oversold_key, default.oversold)?,
        overbought: read_number(port, "thresholds", &overbought_key, default.overbought)?,
    })
}

fn read_thresholds(port: &dyn ConfigPort) -> Result<SignalThresholds, Core16Error> {
    let d = SignalThresholds::default();
    Ok(SignalThresholds {
        adx_trend: read_number(port, "thresholds", "adx_trend", d.adx_trend)?,
        adr_k: read_number(port, "thresholds", "adr_k", d.adr_k)?,
        rsi: read_band(port, "rsi", d.rsi)?,
        cci: read_band(port, "cci", d.cci)?,
        stochastic: read_band(port, "stochastic", d.stochastic)?,
        williams: read_band(port, "williams", d.williams)?,
        cmo: read_band(port, "cmo", d.cmo)?,
        demarker: read_band(port, "demarker", d.demarker)?,
        psy: read_band(port, "psy", d.psy)?,
        npsy: read_band(port, "npsy", d.npsy)?,
    })
}
