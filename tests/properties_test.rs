//! Property tests over randomly generated price paths.

mod common;

use common::*;
use core16::domain::config::{IndicatorConfig, SignalThresholds};
use core16::domain::engine::IndicatorEngine;
use core16::domain::indicator::ema::calculate_ema;
use core16::domain::indicator::macd::{DEFAULT_LONG, DEFAULT_SHORT, DEFAULT_SIGNAL, calculate_macd};
use core16::domain::indicator::rsi::calculate_rsi;
use core16::domain::indicator::{IndicatorType, RsiSmoothing};
use core16::domain::resample::Resample;
use core16::domain::signal::{generate_signals, signal_rules};
use core16::domain::table::SignalTable;
use proptest::prelude::*;

/// Closes from a bounded random walk plus per-bar wick sizes.
fn price_path(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<OhlcvBar>> {
    prop::collection::vec((-3.0f64..3.0, 0.0f64..2.0, 0.0f64..2.0), min_len..max_len).prop_map(
        |steps| {
            let mut close = 100.0;
            let closes: Vec<f64> = steps
                .iter()
                .map(|(step, _, _)| {
                    close = (close + step).max(1.0);
                    close
                })
                .collect();
            let mut bars = bars_from_closes("2024-01-01", &closes);
            for (bar, (_, up, down)) in bars.iter_mut().zip(&steps) {
                bar.high = bar.close + up;
                bar.low = (bar.close - down).max(0.5);
            }
            bars
        },
    )
}

fn small_config() -> IndicatorConfig {
    IndicatorConfig {
        sma_periods: vec![5, 10],
        ema_periods: vec![5, 10],
        tsi_short: 4,
        tsi_long: 8,
        tsi_signal: 4,
        macd_short: 5,
        macd_long: 10,
        macd_signal: 4,
        ichimoku_tenkan: 4,
        ichimoku_kijun: 8,
        ichimoku_senkou: 16,
        ..IndicatorConfig::default()
    }
}

fn signals_for(bars: Vec<OhlcvBar>) -> SignalTable {
    let indicators = small_config().indicators();
    let table = IndicatorEngine::new(indicators.clone(), false)
        .compute(&series(bars), Resample::Daily)
        .unwrap();
    generate_signals(&table, &signal_rules(&indicators, &SignalThresholds::default()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn signals_are_in_domain(bars in price_path(20, 80)) {
        let signals = signals_for(bars);
        for name in signals.column_names() {
            for s in signals.column(name).unwrap() {
                prop_assert!([-1i8, 0, 1].contains(&s.value()));
            }
        }
    }

    #[test]
    fn signal_at_row_ignores_same_and_later_rows(
        bars in price_path(30, 70),
        cut in 0.2f64..0.9,
        bump in 1.0f64..20.0,
    ) {
        let t = ((bars.len() as f64) * cut) as usize;
        let mut changed = bars.clone();
        for bar in &mut changed[t..] {
            bar.close += bump;
            bar.high += bump * 1.5;
            bar.low = (bar.low - bump).max(0.1);
            bar.volume *= 3;
        }

        let before = signals_for(bars);
        let after = signals_for(changed);
        for name in before.column_names() {
            let a = before.column(name).unwrap();
            let b = after.column(name).unwrap();
            prop_assert_eq!(&a[..=t], &b[..=t], "{}", name);
        }
    }

    #[test]
    fn rsi_is_bounded(bars in price_path(20, 100), period in 2usize..20) {
        let s = series(bars);
        for smoothing in [RsiSmoothing::Simple, RsiSmoothing::Wilder] {
            for v in calculate_rsi(&s, period, smoothing) {
                if !v.is_nan() {
                    prop_assert!((0.0..=100.0).contains(&v), "{}", v);
                }
            }
        }
    }

    #[test]
    fn macd_line_is_ema_difference(bars in price_path(5, 100)) {
        let s = series(bars);
        let macd = calculate_macd(&s, DEFAULT_SHORT, DEFAULT_LONG, DEFAULT_SIGNAL);
        let short = calculate_ema(&s, DEFAULT_SHORT);
        let long = calculate_ema(&s, DEFAULT_LONG);
        for i in 0..s.len() {
            prop_assert_eq!(macd.line[i].to_bits(), (short[i] - long[i]).to_bits());
        }
    }

    #[test]
    fn indicator_table_is_idempotent(bars in price_path(10, 60)) {
        let indicators = small_config().indicators();
        let engine = IndicatorEngine::new(indicators, true);
        let s = series(bars);
        let a = engine.compute(&s, Resample::Daily).unwrap();
        let b = engine.compute(&s, Resample::Daily).unwrap();
        prop_assert_eq!(a.column_names(), b.column_names());
        for name in a.column_names() {
            let (x, y) = (a.column(name).unwrap(), b.column(name).unwrap());
            prop_assert!(x.iter().zip(y).all(|(p, q)| p.to_bits() == q.to_bits()));
        }
    }

    #[test]
    fn rolling_outputs_warm_up(bars in price_path(25, 60), period in 2usize..20) {
        let table = IndicatorEngine::new(vec![IndicatorType::Sma(period)], false)
            .compute(&series(bars), Resample::Daily)
            .unwrap();
        let sma = table.column(&format!("SMA({period})")).unwrap();
        prop_assert!(sma[..period - 1].iter().all(|v| v.is_nan()));
        prop_assert!(sma[period - 1..].iter().all(|v| v.is_finite()));
    }
}
