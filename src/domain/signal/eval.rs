//! Rule evaluation against an indicator table.
//!
//! Operands that cannot be resolved (missing column, out-of-range row,
//! previous row at index 0) are NaN, and every comparison with NaN is false.

use crate::domain::signal::rule::{Operand, Rule};
use crate::domain::table::IndicatorTable;

pub fn evaluate(rule: &Rule, table: &IndicatorTable, bar_index: usize) -> bool {
    match rule {
        Rule::Above { left, right } => {
            let left_val = resolve_operand(left, table, bar_index);
            let right_val = resolve_operand(right, table, bar_index);
            left_val > right_val
        }
        Rule::Below { left, right } => {
            let left_val = resolve_operand(left, table, bar_index);
            let right_val = resolve_operand(right, table, bar_index);
            left_val < right_val
        }
        Rule::And(rules) => rules.iter().all(|r| evaluate(r, table, bar_index)),
    }
}

pub fn resolve_operand(operand: &Operand, table: &IndicatorTable, bar_index: usize) -> f64 {
    let Some(bar) = table.series().bars().get(bar_index) else {
        return f64::NAN;
    };
    match operand {
        Operand::Open => bar.open,
        Operand::High => bar.high,
        Operand::Low => bar.low,
        Operand::Close => bar.close,
        Operand::Volume => bar.volume as f64,
        Operand::Range => bar.range(),
        Operand::Constant(v) => *v,
        Operand::Column(name) => column_value(table, name, bar_index),
        Operand::Scaled { column, factor } => column_value(table, column, bar_index) * factor,
        Operand::Previous(name) => match bar_index.checked_sub(1) {
            Some(prev) => column_value(table, name, prev),
            None => f64::NAN,
        },
    }
}

fn column_value(table: &IndicatorTable, name: &str, bar_index: usize) -> f64 {
    table
        .column(name)
        .and_then(|values| values.get(bar_index).copied())
        .unwrap_or(f64::NAN)
}
