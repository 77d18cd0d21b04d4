//! Builds the signal table from an indicator table and a rule set.
//!
//! Each rule is evaluated on every row (buy wins over sell, otherwise
//! neutral) and the resulting column is shifted forward one bar, so the
//! signal on row T only depends on data up to row T-1.

use crate::domain::error::Core16Error;
use crate::domain::signal::eval::evaluate;
use crate::domain::signal::rule::SignalRule;
use crate::domain::table::{IndicatorTable, Signal, SignalTable};
use tracing::{debug, info, warn};

pub fn generate_signals(table: &IndicatorTable, rules: &[SignalRule]) -> SignalTable {
    let mut signals = SignalTable::new(table.dates());

    for rule in rules {
        if let Some(column) = rule
            .required_columns()
            .into_iter()
            .find(|c| !table.has_column(c))
        {
            warn!(signal = %rule.name, column, "skipping signal: required column missing");
            signals.push_skipped(Core16Error::MissingColumn {
                signal: rule.name.clone(),
                column: column.to_string(),
            });
            continue;
        }

        let raw = raw_signals(table, rule);
        if !signals.push_column(rule.name.clone(), shift_forward(&raw)) {
            warn!(signal = %rule.name, "duplicate signal column ignored");
            continue;
        }
        debug!(signal = %rule.name, "signal column generated");
    }

    info!(
        columns = signals.column_names().len(),
        skipped = signals.skipped().len(),
        "signal table generated"
    );
    signals
}

fn raw_signals(table: &IndicatorTable, rule: &SignalRule) -> Vec<Signal> {
    (0..table.len())
        .map(|i| {
            if evaluate(&rule.buy, table, i) {
                Signal::Buy
            } else if evaluate(&rule.sell, table, i) {
                Signal::Sell
            } else {
                Signal::Neutral
            }
        })
        .collect()
}

fn shift_forward(raw: &[Signal]) -> Vec<Signal> {
    if raw.is_empty() {
        return Vec::new();
    }
    std::iter::once(Signal::Neutral)
        .chain(raw[..raw.len() - 1].iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::SignalThresholds;
    use crate::domain::indicator::IndicatorType;
    use crate::domain::indicator::test_support::series_from_closes;
    use crate::domain::resample::Resample;
    use crate::domain::signal::rule::{Operand, Rule};
    use crate::domain::signal::rules::signal_rules;

    fn sma_table(closes: &[f64], period: usize) -> IndicatorTable {
        let series = series_from_closes(closes);
        let ind = IndicatorType::Sma(period);
        let mut table = IndicatorTable::new(series.clone(), Resample::Daily);
        for (name, values) in ind.column_names().into_iter().zip(ind.compute(&series)) {
            table.push_column(name, values);
        }
        table
    }

    #[test]
    fn shift_moves_every_signal_one_row() {
        let raw = [Signal::Buy, Signal::Sell, Signal::Neutral, Signal::Buy];
        assert_eq!(
            shift_forward(&raw),
            vec![Signal::Neutral, Signal::Buy, Signal::Sell, Signal::Neutral]
        );
        assert!(shift_forward(&[]).is_empty());
    }

    #[test]
    fn rising_series_buys_after_warmup() {
        let closes: Vec<f64> = (1..=10).map(f64::from).collect();
        let table = sma_table(&closes, 5);
        let rules = signal_rules(&[IndicatorType::Sma(5)], &SignalThresholds::default());
        let signals = generate_signals(&table, &rules);

        let col = signals.column("SMA(5)").unwrap();
        // raw signal first defined on row 4, shifted to row 5
        assert!(col[..5].iter().all(|s| *s == Signal::Neutral));
        assert!(col[5..].iter().all(|s| *s == Signal::Buy));
    }

    #[test]
    fn falling_series_sells() {
        let closes: Vec<f64> = (1..=10).rev().map(f64::from).collect();
        let table = sma_table(&closes, 3);
        let rules = signal_rules(&[IndicatorType::Sma(3)], &SignalThresholds::default());
        let signals = generate_signals(&table, &rules);
        assert_eq!(signals.column("SMA(3)").unwrap()[9], Signal::Sell);
    }

    #[test]
    fn missing_column_skips_only_that_signal() {
        let closes: Vec<f64> = (1..=10).map(f64::from).collect();
        let table = sma_table(&closes, 5);
        let rules = signal_rules(
            &[IndicatorType::Sma(5), IndicatorType::Ema(5)],
            &SignalThresholds::default(),
        );
        let signals = generate_signals(&table, &rules);

        assert!(signals.column("SMA(5)").is_some());
        assert!(signals.column("EMA(5)").is_none());
        assert_eq!(signals.skipped().len(), 1);
        assert!(matches!(
            &signals.skipped()[0],
            Core16Error::MissingColumn { signal, column } if signal == "EMA(5)" && column == "EMA(5)"
        ));
    }

    #[test]
    fn buy_takes_precedence_over_sell() {
        let table = sma_table(&[1.0, 2.0, 3.0], 2);
        let rule = SignalRule {
            name: "ALWAYS".into(),
            indicator: IndicatorType::Sma(2),
            buy: Rule::above(Operand::Close, Operand::Constant(0.0)),
            sell: Rule::above(Operand::Close, Operand::Constant(0.0)),
        };
        let signals = generate_signals(&table, &[rule]);
        assert_eq!(
            signals.column("ALWAYS").unwrap(),
            &[Signal::Neutral, Signal::Buy, Signal::Buy]
        );
    }
}
