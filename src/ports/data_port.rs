//! Price data access port trait.

use crate::domain::error::Core16Error;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars in source order, optionally restricted to `[start, end]`.
    /// Ordering is validated by `PriceSeries::new`, not here.
    fn fetch_ohlcv(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, Core16Error>;
}
