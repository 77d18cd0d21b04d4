//! Period aggregation of a daily price series.
//!
//! Weekly buckets end on Friday and monthly buckets end on the last calendar
//! day; each output bar is dated by its bucket end. Buckets span the first to
//! the last source bar. A bucket with no source bars repeats the previous
//! bucket's OHLC with zero volume.

use crate::domain::error::Core16Error;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::price_series::PriceSeries;
use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resample {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl fmt::Display for Resample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resample::Daily => write!(f, "daily"),
            Resample::Weekly => write!(f, "weekly"),
            Resample::Monthly => write!(f, "monthly"),
        }
    }
}

impl FromStr for Resample {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "d" | "1d" => Ok(Resample::Daily),
            "weekly" | "w" | "w-fri" => Ok(Resample::Weekly),
            "monthly" | "m" | "me" => Ok(Resample::Monthly),
            other => Err(format!(
                "unknown resample period '{other}' (expected daily, weekly or monthly)"
            )),
        }
    }
}

impl Resample {
    fn bucket_end(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Resample::Daily => Some(date),
            Resample::Weekly => {
                let from_monday = date.weekday().num_days_from_monday();
                let ahead = (4 + 7 - from_monday) % 7;
                date.checked_add_days(Days::new(ahead as u64))
            }
            Resample::Monthly => date
                .with_day(1)?
                .checked_add_months(Months::new(1))?
                .pred_opt(),
        }
    }

    fn next_bucket_end(self, end: NaiveDate) -> Option<NaiveDate> {
        match self {
            Resample::Daily => end.succ_opt(),
            Resample::Weekly => end.checked_add_days(Days::new(7)),
            Resample::Monthly => self.bucket_end(end.succ_opt()?),
        }
    }
}

/// Aggregate `series` into `period` buckets. `Daily` returns a copy.
pub fn resample(series: &PriceSeries, period: Resample) -> Result<PriceSeries, Core16Error> {
    if period == Resample::Daily {
        return Ok(series.clone());
    }

    let out_of_range = || Core16Error::input("date out of range while resampling");
    let bars = series.bars();
    let last_end = period.bucket_end(series.last_date()).ok_or_else(out_of_range)?;
    let mut bucket = period.bucket_end(series.first_date()).ok_or_else(out_of_range)?;
    let mut out: Vec<OhlcvBar> = Vec::new();
    let mut i = 0;

    loop {
        let start = i;
        while i < bars.len() && bars[i].date <= bucket {
            i += 1;
        }
        let members = &bars[start..i];
        if let (Some(first), Some(last)) = (members.first(), members.last()) {
            out.push(OhlcvBar {
                date: bucket,
                open: first.open,
                high: members.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max),
                low: members.iter().map(|b| b.low).fold(f64::INFINITY, f64::min),
                close: last.close,
                volume: members.iter().map(|b| b.volume).sum(),
            });
        } else if let Some(prev) = out.last() {
            let filled = OhlcvBar {
                date: bucket,
                volume: 0,
                ..prev.clone()
            };
            out.push(filled);
        }

        if bucket >= last_end {
            break;
        }
        bucket = period.next_bucket_end(bucket).ok_or_else(out_of_range)?;
    }

    PriceSeries::new(out)
}
