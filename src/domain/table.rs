//! Wide result tables keyed by the (possibly resampled) date index.

use crate::domain::error::Core16Error;
use crate::domain::price_series::PriceSeries;
use crate::domain::resample::Resample;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fmt;

/// Indicator outputs as named columns aligned to the price series they were
/// computed on.
#[derive(Debug)]
pub struct IndicatorTable {
    series: PriceSeries,
    resample: Resample,
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    index: HashMap<String, usize>,
    warnings: Vec<Core16Error>,
}

impl IndicatorTable {
    pub fn new(series: PriceSeries, resample: Resample) -> Self {
        Self {
            series,
            resample,
            names: Vec::new(),
            columns: Vec::new(),
            index: HashMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Append a column. Returns false, leaving the table unchanged, if the
    /// name is already taken or the length does not match the date index.
    pub fn push_column(&mut self, name: String, values: Vec<f64>) -> bool {
        if values.len() != self.series.len() || self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.columns.len());
        self.names.push(name);
        self.columns.push(values);
        true
    }

    pub(crate) fn push_warning(&mut self, warning: Core16Error) {
        self.warnings.push(warning);
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn resample(&self) -> Resample {
        self.resample
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.series.dates()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.index.get(name).map(|&i| self.columns[i].as_slice())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Non-fatal insufficient-history notices raised while computing.
    pub fn warnings(&self) -> &[Core16Error] {
        &self.warnings
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Signal {
    Sell = -1,
    #[default]
    Neutral = 0,
    Buy = 1,
}

impl Signal {
    pub fn value(self) -> i8 {
        self as i8
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// One signal column per rule, already shifted one bar forward.
#[derive(Debug)]
pub struct SignalTable {
    dates: Vec<NaiveDate>,
    names: Vec<String>,
    columns: Vec<Vec<Signal>>,
    index: HashMap<String, usize>,
    skipped: Vec<Core16Error>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignalSummary {
    pub buy: usize,
    pub sell: usize,
    pub neutral: usize,
}

impl SignalTable {
    pub fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            names: Vec::new(),
            columns: Vec::new(),
            index: HashMap::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn push_column(&mut self, name: String, values: Vec<Signal>) -> bool {
        if values.len() != self.dates.len() || self.index.contains_key(&name) {
            return false;
        }
        self.index.insert(name.clone(), self.columns.len());
        self.names.push(name);
        self.columns.push(values);
        true
    }

    pub(crate) fn push_skipped(&mut self, error: Core16Error) {
        self.skipped.push(error);
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, name: &str) -> Option<&[Signal]> {
        self.index.get(name).map(|&i| self.columns[i].as_slice())
    }

    /// Signal columns that could not be produced.
    pub fn skipped(&self) -> &[Core16Error] {
        &self.skipped
    }

    /// (name, signal) for every column on the last row.
    pub fn latest(&self) -> Vec<(&str, Signal)> {
        self.names
            .iter()
            .zip(&self.columns)
            .filter_map(|(name, col)| col.last().map(|s| (name.as_str(), *s)))
            .collect()
    }

    pub fn latest_summary(&self) -> SignalSummary {
        let mut summary = SignalSummary::default();
        for (_, signal) in self.latest() {
            match signal {
                Signal::Buy => summary.buy += 1,
                Signal::Sell => summary.sell += 1,
                Signal::Neutral => summary.neutral += 1,
            }
        }
        summary
    }
}
