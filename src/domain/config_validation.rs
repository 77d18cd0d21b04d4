//! Cross-field configuration checks run after loading.

use crate::domain::config::{Band, IndicatorConfig, SignalThresholds};
use crate::domain::error::Core16Error;
use crate::domain::indicator::{AF_SCALE, MULTIPLIER_SCALE, fits_fixed};

pub fn validate_indicator_config(config: &IndicatorConfig) -> Result<(), Core16Error> {
    validate_short_long("tsi", config.tsi_short, config.tsi_long)?;
    validate_short_long("macd", config.macd_short, config.macd_long)?;
    validate_psar(config)?;
    validate_multiplier("keltner", "multiplier", config.keltner_multiplier)?;
    validate_multiplier("bollinger", "stddev", config.bollinger_stddev)?;
    validate_multiplier("pivot", "scale", config.pivot_scale)?;
    Ok(())
}

pub fn validate_thresholds(thresholds: &SignalThresholds) -> Result<(), Core16Error> {
    validate_positive("thresholds", "adx_trend", thresholds.adx_trend)?;
    if !(thresholds.adr_k.is_finite() && thresholds.adr_k > 1.0) {
        return Err(Core16Error::invalid(
            "thresholds",
            "adr_k",
            "adr_k must be greater than 1",
        ));
    }
    let bands = [
        ("rsi", thresholds.rsi),
        ("cci", thresholds.cci),
        ("stochastic", thresholds.stochastic),
        ("williams", thresholds.williams),
        ("cmo", thresholds.cmo),
        ("demarker", thresholds.demarker),
        ("psy", thresholds.psy),
        ("npsy", thresholds.npsy),
    ];
    for (name, band) in bands {
        validate_band(name, band)?;
    }
    Ok(())
}

fn validate_short_long(section: &str, short: usize, long: usize) -> Result<(), Core16Error> {
    if short >= long {
        return Err(Core16Error::invalid(
            section,
            "short",
            format!("short ({short}) must be less than long ({long})"),
        ));
    }
    Ok(())
}

fn validate_psar(config: &IndicatorConfig) -> Result<(), Core16Error> {
    let p = &config.psar;
    for (key, value) in [
        ("af_start", p.af_start),
        ("af_increment", p.af_increment),
        ("af_max", p.af_max),
    ] {
        if !(value > 0.0 && value <= 1.0) {
            return Err(Core16Error::invalid(
                "psar",
                key,
                format!("{key} must be in (0, 1]"),
            ));
        }
        if !fits_fixed(value, AF_SCALE) {
            return Err(Core16Error::invalid(
                "psar",
                key,
                format!("{key} must be a multiple of 0.001"),
            ));
        }
    }
    if p.af_start > p.af_max {
        return Err(Core16Error::invalid(
            "psar",
            "af_start",
            "af_start must not exceed af_max",
        ));
    }
    Ok(())
}

fn validate_positive(section: &str, key: &str, value: f64) -> Result<(), Core16Error> {
    if !(value.is_finite() && value > 0.0) {
        return Err(Core16Error::invalid(
            section,
            key,
            format!("{key} must be positive"),
        ));
    }
    Ok(())
}

fn validate_multiplier(section: &str, key: &str, value: f64) -> Result<(), Core16Error> {
    validate_positive(section, key, value)?;
    if !fits_fixed(value, MULTIPLIER_SCALE) {
        return Err(Core16Error::invalid(
            section,
            key,
            format!("{key} must be a multiple of 0.01"),
        ));
    }
    Ok(())
}

fn validate_band(name: &str, band: Band) -> Result<(), Core16Error> {
    if !(band.oversold < band.overbought) {
        return Err(Core16Error::invalid(
            "thresholds",
            &format!("{name}_oversold"),
            format!("{name}_oversold must be below {name}_overbought"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::Band;

    fn expect_invalid(result: Result<(), Core16Error>, section: &str, key: &str) {
        match result {
            Err(Core16Error::ConfigInvalid {
                section: s, key: k, ..
            }) => {
                assert_eq!(s, section);
                assert_eq!(k, key);
            }
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_indicator_config(&IndicatorConfig::default()).is_ok());
        assert!(validate_thresholds(&SignalThresholds::default()).is_ok());
    }

    #[test]
    fn macd_short_must_be_below_long() {
        let config = IndicatorConfig {
            macd_short: 26,
            macd_long: 12,
            ..IndicatorConfig::default()
        };
        expect_invalid(validate_indicator_config(&config), "macd", "short");
    }

    #[test]
    fn tsi_equal_windows_rejected() {
        let config = IndicatorConfig {
            tsi_short: 25,
            tsi_long: 25,
            ..IndicatorConfig::default()
        };
        expect_invalid(validate_indicator_config(&config), "tsi", "short");
    }

    #[test]
    fn psar_bounds() {
        let mut config = IndicatorConfig::default();
        config.psar.af_max = 1.5;
        expect_invalid(validate_indicator_config(&config), "psar", "af_max");

        let mut config = IndicatorConfig::default();
        config.psar.af_start = 0.3;
        expect_invalid(validate_indicator_config(&config), "psar", "af_start");

        let mut config = IndicatorConfig::default();
        config.psar.af_increment = 0.0;
        expect_invalid(validate_indicator_config(&config), "psar", "af_increment");
    }

    #[test]
    fn multiplier_must_be_positive() {
        let config = IndicatorConfig {
            bollinger_stddev: -1.0,
            ..IndicatorConfig::default()
        };
        expect_invalid(validate_indicator_config(&config), "bollinger", "stddev");
    }

    #[test]
    fn multiplier_below_fixed_point_resolution_rejected() {
        let config = IndicatorConfig {
            keltner_multiplier: 0.004,
            ..IndicatorConfig::default()
        };
        expect_invalid(validate_indicator_config(&config), "keltner", "multiplier");

        let config = IndicatorConfig {
            pivot_scale: 1.755,
            ..IndicatorConfig::default()
        };
        expect_invalid(validate_indicator_config(&config), "pivot", "scale");
    }

    #[test]
    fn psar_factor_off_grid_rejected() {
        let mut config = IndicatorConfig::default();
        config.psar.af_increment = 0.0215;
        expect_invalid(validate_indicator_config(&config), "psar", "af_increment");

        let mut config = IndicatorConfig::default();
        config.psar.af_start = 0.025;
        assert!(validate_indicator_config(&config).is_ok());
    }

    #[test]
    fn inverted_band_rejected() {
        let thresholds = SignalThresholds {
            rsi: Band::new(70.0, 30.0),
            ..SignalThresholds::default()
        };
        expect_invalid(validate_thresholds(&thresholds), "thresholds", "rsi_oversold");
    }

    #[test]
    fn adr_k_must_exceed_one() {
        let thresholds = SignalThresholds {
            adr_k: 1.0,
            ..SignalThresholds::default()
        };
        expect_invalid(validate_thresholds(&thresholds), "thresholds", "adr_k");
    }
}
