//! Result persistence port trait.

use crate::domain::error::Core16Error;
use crate::domain::table::{IndicatorTable, SignalTable};
use std::path::Path;

pub trait TablePort {
    fn write_indicators(&self, table: &IndicatorTable, path: &Path) -> Result<(), Core16Error>;

    fn write_signals(&self, table: &SignalTable, path: &Path) -> Result<(), Core16Error>;
}
