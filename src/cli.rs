//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::{CsvAdapter, CsvTableWriter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::Config;
use crate::domain::engine::IndicatorEngine;
use crate::domain::error::Core16Error;
use crate::domain::price_series::PriceSeries;
use crate::domain::resample::Resample;
use crate::domain::signal::{generate_signals, signal_rules};
use crate::domain::table::{IndicatorTable, Signal, SignalTable};
use crate::ports::data_port::DataPort;
use crate::ports::table_port::TablePort;

#[derive(Parser, Debug)]
#[command(name = "core16", about = "Technical indicator and trading signal engine")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute indicators and signals, then print the latest signals
    Run {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// daily, weekly or monthly; overrides [engine] resample
        #[arg(long)]
        resample: Option<Resample>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Write the indicator table to this CSV file
        #[arg(long)]
        indicators: Option<PathBuf>,
        /// Write the signal table to this CSV file
        #[arg(long)]
        signals: Option<PathBuf>,
    },
    /// Compute the indicator table only
    Indicators {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        resample: Option<Resample>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Validate a configuration file and list the columns it produces
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Run {
            input,
            config,
            resample,
            start,
            end,
            indicators,
            signals,
        } => run_signals(
            &input,
            config.as_ref(),
            resample,
            start,
            end,
            indicators.as_ref(),
            signals.as_ref(),
        ),
        Command::Indicators {
            input,
            output,
            config,
            resample,
            start,
            end,
        } => run_indicators(&input, &output, config.as_ref(), resample, start, end),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Typed configuration from an INI file, or defaults when no file is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<Config, Core16Error> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            let adapter = FileConfigAdapter::from_file(path)?;
            Config::from_port(&adapter)
        }
        None => Ok(Config::default()),
    }
}

/// Load prices and compute the indicator table. `resample` overrides the
/// configured period.
pub fn compute_indicators(
    data: &dyn DataPort,
    config: &Config,
    resample: Option<Resample>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<IndicatorTable, Core16Error> {
    let bars = data.fetch_ohlcv(start, end)?;
    let series = PriceSeries::new(bars)?;
    info!(
        bars = series.len(),
        first = %series.first_date(),
        last = %series.last_date(),
        "price series loaded"
    );

    let period = resample.unwrap_or(config.engine.resample);
    IndicatorEngine::from_config(config).compute(&series, period)
}

/// Full pipeline: indicator table plus its shifted signal table.
pub fn run_pipeline(
    data: &dyn DataPort,
    config: &Config,
    resample: Option<Resample>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(IndicatorTable, SignalTable), Core16Error> {
    let table = compute_indicators(data, config, resample, start, end)?;
    let indicators = config.indicators.indicators();
    let rules = signal_rules(&indicators, &config.thresholds);
    let signals = generate_signals(&table, &rules);
    Ok((table, signals))
}

/// Human-readable report of the last row of the signal table.
pub fn format_summary(signals: &SignalTable) -> String {
    let Some(last) = signals.dates().last() else {
        return "no signals".to_string();
    };
    let summary = signals.latest_summary();
    let mut out = format!(
        "Signals as of {last}: {} buy, {} sell, {} neutral\n",
        summary.buy, summary.sell, summary.neutral
    );
    for (name, signal) in signals.latest() {
        let label = match signal {
            Signal::Buy => "BUY ",
            Signal::Sell => "SELL",
            Signal::Neutral => continue,
        };
        out.push_str(&format!("  {label} {name}\n"));
    }
    for skipped in signals.skipped() {
        out.push_str(&format!("  skipped: {skipped}\n"));
    }
    out
}

fn run_signals(
    input: &PathBuf,
    config_path: Option<&PathBuf>,
    resample: Option<Resample>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    indicators_out: Option<&PathBuf>,
    signals_out: Option<&PathBuf>,
) -> Result<(), Core16Error> {
    // Stage 1: Load config
    let config = load_config(config_path)?;

    // Stage 2: Compute indicators and signals
    let data = CsvAdapter::new(input.clone());
    let (table, signals) = run_pipeline(&data, &config, resample, start, end)?;
    for warning in table.warnings() {
        warn!("{warning}");
    }

    // Stage 3: Persist requested tables
    let writer = CsvTableWriter::new();
    if let Some(path) = indicators_out {
        writer.write_indicators(&table, path)?;
        info!(path = %path.display(), "indicator table written");
    }
    if let Some(path) = signals_out {
        writer.write_signals(&signals, path)?;
        info!(path = %path.display(), "signal table written");
    }

    // Stage 4: Report
    print!("{}", format_summary(&signals));
    Ok(())
}

fn run_indicators(
    input: &PathBuf,
    output: &PathBuf,
    config_path: Option<&PathBuf>,
    resample: Option<Resample>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), Core16Error> {
    let config = load_config(config_path)?;
    let data = CsvAdapter::new(input.clone());
    let table = compute_indicators(&data, &config, resample, start, end)?;
    CsvTableWriter::new().write_indicators(&table, output)?;
    println!(
        "Wrote {} columns x {} rows to {}",
        table.column_names().len(),
        table.len(),
        output.display()
    );
    Ok(())
}

fn run_validate(config_path: &PathBuf) -> Result<(), Core16Error> {
    let config = load_config(Some(config_path))?;
    let indicators = config.indicators.indicators();
    let rules = signal_rules(&indicators, &config.thresholds);

    println!(
        "Configuration is valid (resample: {}, parallel: {})",
        config.engine.resample, config.engine.parallel
    );
    println!("Indicator columns:");
    for indicator in &indicators {
        for name in indicator.column_names() {
            println!("  {name}");
        }
    }
    println!("Signal columns:");
    for rule in &rules {
        println!("  {}", rule.name);
    }
    Ok(())
}
