#![allow(dead_code)]

use chrono::NaiveDate;
use core16::domain::error::Core16Error;
pub use core16::domain::ohlcv::OhlcvBar;
use core16::domain::price_series::PriceSeries;
use core16::ports::data_port::DataPort;

pub struct MockDataPort {
    pub bars: Vec<OhlcvBar>,
    pub error: Option<String>,
}

impl MockDataPort {
    pub fn new(bars: Vec<OhlcvBar>) -> Self {
        Self { bars, error: None }
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_ohlcv(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, Core16Error> {
        if let Some(reason) = &self.error {
            return Err(Core16Error::Input {
                reason: reason.clone(),
            });
        }
        Ok(self
            .bars
            .iter()
            .filter(|b| start.is_none_or(|s| b.date >= s) && end.is_none_or(|e| b.date <= e))
            .cloned()
            .collect())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(date: &str, close: f64) -> OhlcvBar {
    OhlcvBar {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

/// One bar per calendar day with the given closes; high/low are close +/- 1.
pub fn bars_from_closes(start_date: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1000 + i as i64,
        })
        .collect()
}

/// Linear trend starting at `start_price`, one point per day.
pub fn generate_bars(start_date: &str, count: usize, start_price: f64) -> Vec<OhlcvBar> {
    let closes: Vec<f64> = (0..count).map(|i| start_price + i as f64).collect();
    bars_from_closes(start_date, &closes)
}

/// Oscillating closes, useful for exercising every signal branch.
pub fn generate_wave(start_date: &str, count: usize) -> Vec<OhlcvBar> {
    let closes: Vec<f64> = (0..count)
        .map(|i| 100.0 + (i as f64 * 0.3).sin() * 10.0 + i as f64 * 0.05)
        .collect();
    bars_from_closes(start_date, &closes)
}

pub fn series(bars: Vec<OhlcvBar>) -> PriceSeries {
    PriceSeries::new(bars).unwrap()
}

pub fn csv_content(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.date.format("%Y-%m-%d"),
            b.open,
            b.high,
            b.low,
            b.close,
            b.volume
        ));
    }
    out
}
