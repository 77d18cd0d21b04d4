//! Buy/sell rule table for every indicator.
//!
//! Momentum indicators follow the trend (price or line above its reference
//! is a buy). Contrarian indicators fade extremes (oversold is a buy).

use crate::domain::config::{Band, SignalThresholds};
use crate::domain::indicator::{IndicatorField as F, IndicatorType};
use crate::domain::signal::rule::{Operand, Rule, SignalRule};

pub fn signal_rules(
    indicators: &[IndicatorType],
    thresholds: &SignalThresholds,
) -> Vec<SignalRule> {
    let mut out = Vec::new();
    for indicator in indicators {
        rules_for(indicator, thresholds, &mut out);
    }
    out
}

fn rules_for(ind: &IndicatorType, t: &SignalThresholds, out: &mut Vec<SignalRule>) {
    let col = |field| Operand::Column(ind.column_name(field));
    let mut push = |name: String, (buy, sell): (Rule, Rule)| {
        out.push(SignalRule {
            name,
            indicator: ind.clone(),
            buy,
            sell,
        });
    };

    match ind {
        IndicatorType::Sma(_) | IndicatorType::Ema(_) | IndicatorType::Psar { .. } => {
            push(ind.to_string(), trend(Operand::Close, col(F::Value)));
        }
        IndicatorType::Tsi { .. } | IndicatorType::Macd { .. } => {
            push(ind.to_string(), trend(col(F::Value), col(F::Signal)));
        }
        IndicatorType::Adx(_) => {
            let strong = Rule::above(col(F::Value), Operand::Constant(t.adx_trend));
            push(
                ind.to_string(),
                (
                    Rule::And(vec![strong.clone(), Rule::above(col(F::PlusDi), col(F::MinusDi))]),
                    Rule::And(vec![strong, Rule::below(col(F::PlusDi), col(F::MinusDi))]),
                ),
            );
        }
        IndicatorType::Aroon(_) => push(ind.to_string(), trend(col(F::Up), col(F::Down))),
        IndicatorType::Adl(_) => push(ind.to_string(), trend(col(F::Value), col(F::Average))),
        IndicatorType::Adr(_) => {
            let adr = ind.column_name(F::Value);
            push(
                ind.to_string(),
                (
                    Rule::above(
                        Operand::Range,
                        Operand::Scaled {
                            column: adr.clone(),
                            factor: t.adr_k,
                        },
                    ),
                    Rule::below(
                        Operand::Range,
                        Operand::Scaled {
                            column: adr,
                            factor: 1.0 / t.adr_k,
                        },
                    ),
                ),
            );
        }
        IndicatorType::Ichimoku { .. } => {
            push(ind.to_string(), trend(col(F::Tenkan), col(F::Kijun)));
        }
        IndicatorType::Keltner { .. } => {
            let name = ind.to_string();
            let mid_name = name.replacen("KELTNER", "KELTNER_MID", 1);
            push(
                name,
                (
                    Rule::above(Operand::Close, col(F::Upper)),
                    Rule::below(Operand::Close, col(F::Lower)),
                ),
            );
            push(mid_name, trend(Operand::Close, col(F::Middle)));
        }
        IndicatorType::Rsi { .. } => push(ind.to_string(), fade(col(F::Value), t.rsi)),
        IndicatorType::Cci(_) => push(ind.to_string(), fade(col(F::Value), t.cci)),
        IndicatorType::Williams(_) => push(ind.to_string(), fade(col(F::Value), t.williams)),
        IndicatorType::Cmo(_) => push(ind.to_string(), fade(col(F::Value), t.cmo)),
        IndicatorType::DeMarker(_) => push(ind.to_string(), fade(col(F::Value), t.demarker)),
        IndicatorType::Psy(_) => push(ind.to_string(), fade(col(F::Value), t.psy)),
        IndicatorType::Npsy(_) => push(ind.to_string(), fade(col(F::Value), t.npsy)),
        IndicatorType::Bollinger { .. } => {
            push(
                ind.to_string(),
                (
                    Rule::below(Operand::Close, col(F::Lower)),
                    Rule::above(Operand::Close, col(F::Upper)),
                ),
            );
        }
        IndicatorType::Stochastic { .. } => {
            let (k_buy, k_sell) = fade(col(F::K), t.stochastic);
            let (d_buy, d_sell) = fade(col(F::D), t.stochastic);
            push(
                ind.to_string(),
                (Rule::And(vec![k_buy, d_buy]), Rule::And(vec![k_sell, d_sell])),
            );
        }
        IndicatorType::Donchian(_) => {
            // The current bar is inside its own channel, so break-outs are
            // measured against the channel as of the previous bar.
            push(
                ind.to_string(),
                (
                    Rule::above(Operand::Close, Operand::Previous(ind.column_name(F::Upper))),
                    Rule::below(Operand::Close, Operand::Previous(ind.column_name(F::Lower))),
                ),
            );
        }
        IndicatorType::Pivot { .. } => {
            push(
                ind.to_string(),
                (
                    Rule::below(Operand::Close, col(F::S1)),
                    Rule::above(Operand::Close, col(F::R1)),
                ),
            );
        }
    }
}

/// Buy when `left` is above `right`, sell when below.
fn trend(left: Operand, right: Operand) -> (Rule, Rule) {
    (
        Rule::above(left.clone(), right.clone()),
        Rule::below(left, right),
    )
}

/// Buy below the oversold level, sell above the overbought level.
fn fade(value: Operand, band: Band) -> (Rule, Rule) {
    (
        Rule::below(value.clone(), Operand::Constant(band.oversold)),
        Rule::above(value, Operand::Constant(band.overbought)),
    )
}
