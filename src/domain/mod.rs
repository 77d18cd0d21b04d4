//! Core domain types and logic.

pub mod ohlcv;
pub mod price_series;
pub mod series;
pub mod resample;
pub mod indicator;
pub mod table;
pub mod engine;
pub mod signal;
pub mod config;
pub mod config_validation;
pub mod error;
