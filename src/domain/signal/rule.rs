//! Rule AST data structures.
//!
//! - `Operand`: what can be compared (price fields, constants, table columns)
//! - `Rule`: comparisons and their conjunction
//! - `SignalRule`: a named buy/sell pair attached to one indicator

use crate::domain::indicator::IndicatorType;

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Open,
    High,
    Low,
    Close,
    Volume,
    /// High minus low of the current bar.
    Range,
    Constant(f64),
    Column(String),
    /// Column value multiplied by a constant factor.
    Scaled { column: String, factor: f64 },
    /// Column value on the previous row; NaN on row 0.
    Previous(String),
}

impl Operand {
    pub fn column(name: impl Into<String>) -> Self {
        Operand::Column(name.into())
    }

    /// Table column this operand reads, if any.
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Operand::Column(name) | Operand::Previous(name) => Some(name),
            Operand::Scaled { column, .. } => Some(column),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Above { left: Operand, right: Operand },
    Below { left: Operand, right: Operand },
    And(Vec<Rule>),
}

impl Rule {
    pub fn above(left: Operand, right: Operand) -> Self {
        Rule::Above { left, right }
    }

    pub fn below(left: Operand, right: Operand) -> Self {
        Rule::Below { left, right }
    }

    /// Every table column referenced anywhere in the rule, in first-use order.
    pub fn required_columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Rule::Above { left, right } | Rule::Below { left, right } => {
                for name in [left.column_name(), right.column_name()].into_iter().flatten() {
                    if !out.contains(&name) {
                        out.push(name);
                    }
                }
            }
            Rule::And(rules) => {
                for rule in rules {
                    rule.collect_columns(out);
                }
            }
        }
    }
}

/// Buy and sell conditions producing one signal column.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRule {
    pub name: String,
    pub indicator: IndicatorType,
    pub buy: Rule,
    pub sell: Rule,
}

impl SignalRule {
    pub fn required_columns(&self) -> Vec<&str> {
        let mut out = self.buy.required_columns();
        for name in self.sell.required_columns() {
            if !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}
