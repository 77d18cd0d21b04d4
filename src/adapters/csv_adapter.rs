//! CSV price input and table output.

use crate::domain::error::Core16Error;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::table::{IndicatorTable, SignalTable};
use crate::ports::data_port::DataPort;
use crate::ports::table_port::TablePort;
use chrono::NaiveDate;
use csv::StringRecord;
use std::path::{Path, PathBuf};
use tracing::warn;

const REQUIRED: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

/// Reads `Date, Open, High, Low, Close, Volume` from one CSV file. Header
/// names are matched case-insensitively and may appear in any order.
pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

/// Positions of the required columns within a header row.
struct Columns([usize; 6]);

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, Core16Error> {
        let mut idx = [0; 6];
        for (slot, name) in idx.iter_mut().zip(REQUIRED) {
            *slot = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| Core16Error::input(format!("missing required column '{name}'")))?;
        }
        Ok(Self(idx))
    }

    fn field<'r>(&self, record: &'r StringRecord, which: usize, line: u64) -> Result<&'r str, Core16Error> {
        record
            .get(self.0[which])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                Core16Error::input(format!("line {line}: empty {} value", REQUIRED[which]))
            })
    }

    /// A missing or unparseable price becomes NaN.
    fn price(&self, record: &StringRecord, which: usize, line: u64) -> f64 {
        let raw = record.get(self.0[which]).map(str::trim).unwrap_or_default();
        match raw.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                warn!(line, column = REQUIRED[which], value = raw, "malformed price, using NaN");
                f64::NAN
            }
        }
    }

    /// Whole or fractional volume; anything else counts as zero.
    fn volume(&self, record: &StringRecord, line: u64) -> i64 {
        let raw = record.get(self.0[5]).map(str::trim).unwrap_or_default();
        if let Ok(v) = raw.parse::<i64>() {
            return v;
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => v.round() as i64,
            _ => {
                warn!(line, value = raw, "malformed volume, using 0");
                0
            }
        }
    }

    fn bar(&self, record: &StringRecord, line: u64) -> Result<OhlcvBar, Core16Error> {
        let raw_date = self.field(record, 0, line)?;
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|e| {
            Core16Error::input(format!("line {line}: invalid date '{raw_date}': {e}"))
        })?;

        Ok(OhlcvBar {
            date,
            open: self.price(record, 1, line),
            high: self.price(record, 2, line),
            low: self.price(record, 3, line),
            close: self.price(record, 4, line),
            volume: self.volume(record, line),
        })
    }
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, Core16Error> {
        let mut rdr = csv::Reader::from_path(&self.path)?;
        let columns = Columns::locate(rdr.headers()?)?;
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());
            let bar = columns.bar(&record, line)?;

            if start.is_some_and(|s| bar.date < s) || end.is_some_and(|e| bar.date > e) {
                continue;
            }
            bars.push(bar);
        }

        Ok(bars)
    }
}

/// Writes tables with a `Date` column first; NaN becomes an empty field.
#[derive(Debug, Default)]
pub struct CsvTableWriter;

impl CsvTableWriter {
    pub fn new() -> Self {
        Self
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

impl TablePort for CsvTableWriter {
    fn write_indicators(&self, table: &IndicatorTable, path: &Path) -> Result<(), Core16Error> {
        let mut wtr = csv::Writer::from_path(path)?;
        let names = table.column_names();

        let mut header = vec!["Date".to_string()];
        header.extend(names.iter().cloned());
        wtr.write_record(&header)?;

        let columns: Vec<&[f64]> = names.iter().filter_map(|n| table.column(n)).collect();
        for (i, date) in table.dates().iter().enumerate() {
            let mut row = vec![date.format("%Y-%m-%d").to_string()];
            row.extend(columns.iter().map(|col| format_value(col[i])));
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn write_signals(&self, table: &SignalTable, path: &Path) -> Result<(), Core16Error> {
        let mut wtr = csv::Writer::from_path(path)?;
        let names = table.column_names();

        let mut header = vec!["Date".to_string()];
        header.extend(names.iter().cloned());
        wtr.write_record(&header)?;

        let columns: Vec<_> = names.iter().filter_map(|n| table.column(n)).collect();
        for (i, date) in table.dates().iter().enumerate() {
            let mut row = vec![date.format("%Y-%m-%d").to_string()];
            row.extend(columns.iter().map(|col| col[i].to_string()));
            wtr.write_record(&row)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
