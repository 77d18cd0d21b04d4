//! Validated, ascending price series for a single instrument.

use crate::domain::error::Core16Error;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct PriceSeries {
    bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    /// Build a series from bars already in date order.
    ///
    /// Rejects an empty input and any date that is not strictly after its
    /// predecessor (which covers duplicates).
    pub fn new(bars: Vec<OhlcvBar>) -> Result<Self, Core16Error> {
        if bars.is_empty() {
            return Err(Core16Error::input("price series is empty"));
        }
        for pair in bars.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(Core16Error::input(format!(
                    "dates must be strictly ascending: {} follows {}",
                    pair[1].date, pair[0].date
                )));
            }
        }
        Ok(Self { bars })
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }
}
