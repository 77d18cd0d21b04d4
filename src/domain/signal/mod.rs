//! Signal generation.
//!
//! - `rule`: comparison AST over indicator columns and price fields
//! - `rules`: the per-indicator buy/sell rule table
//! - `eval`: evaluates a rule at one row of an [`IndicatorTable`]
//! - `engine`: builds the shifted [`SignalTable`]
//!
//! [`IndicatorTable`]: crate::domain::table::IndicatorTable
//! [`SignalTable`]: crate::domain::table::SignalTable

pub mod engine;
pub mod eval;
pub mod rule;
pub mod rules;

pub use engine::generate_signals;
pub use rule::{Operand, Rule, SignalRule};
pub use rules::signal_rules;
