//! Indicator engine: resamples a price series and computes every configured
//! indicator into one [`IndicatorTable`].

use crate::domain::config::Config;
use crate::domain::error::Core16Error;
use crate::domain::indicator::IndicatorType;
use crate::domain::price_series::PriceSeries;
use crate::domain::resample::{Resample, resample};
use crate::domain::table::IndicatorTable;
use rayon::prelude::*;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    indicators: Vec<IndicatorType>,
    parallel: bool,
}

impl IndicatorEngine {
    pub fn new(indicators: Vec<IndicatorType>, parallel: bool) -> Self {
        Self {
            indicators,
            parallel,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.indicators.indicators(), config.engine.parallel)
    }

    pub fn indicators(&self) -> &[IndicatorType] {
        &self.indicators
    }

    /// Resample `series` to `period`, then compute all indicators on the
    /// result. Parallel and sequential runs produce identical tables.
    pub fn compute(
        &self,
        series: &PriceSeries,
        period: Resample,
    ) -> Result<IndicatorTable, Core16Error> {
        let started = Instant::now();
        let series = resample(series, period)?;
        info!(
            bars = series.len(),
            resample = %period,
            indicators = self.indicators.len(),
            "computing indicators"
        );

        let outputs: Vec<Vec<Vec<f64>>> = if self.parallel {
            self.indicators
                .par_iter()
                .map(|ind| compute_one(ind, &series))
                .collect()
        } else {
            self.indicators
                .iter()
                .map(|ind| compute_one(ind, &series))
                .collect()
        };

        let mut table = IndicatorTable::new(series, period);
        for (ind, columns) in self.indicators.iter().zip(outputs) {
            let needed = ind.required_bars();
            if table.len() < needed {
                warn!(
                    indicator = %ind,
                    window = needed,
                    bars = table.len(),
                    "insufficient history, column is all NaN"
                );
                table.push_warning(Core16Error::InsufficientHistory {
                    column: ind.to_string(),
                    window: needed,
                    bars: table.len(),
                });
            }
            for (name, values) in ind.column_names().into_iter().zip(columns) {
                if !table.push_column(name.clone(), values) {
                    debug!(column = %name, "duplicate column ignored");
                }
            }
        }

        info!(
            columns = table.column_names().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "indicator table computed"
        );
        Ok(table)
    }
}

fn compute_one(ind: &IndicatorType, series: &PriceSeries) -> Vec<Vec<f64>> {
    let started = Instant::now();
    let columns = ind.compute(series);
    debug!(
        indicator = %ind,
        elapsed_us = started.elapsed().as_micros() as u64,
        "indicator computed"
    );
    columns
}
