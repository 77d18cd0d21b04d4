//! CLI integration tests for command orchestration.
//!
//! Tests cover:
//! - Config loading from real INI files on disk
//! - Exit codes per error family
//! - `run` and `indicators` with CSV input and output files
//! - `validate` on good and bad configurations

mod common;

use clap::Parser;
use common::*;
use core16::cli::{self, Cli};
use core16::domain::error::Core16Error;
use core16::domain::resample::Resample;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tempfile::TempDir;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn write_prices(dir: &TempDir, bars: &[OhlcvBar]) -> PathBuf {
    let path = dir.path().join("prices.csv");
    fs::write(&path, csv_content(bars)).unwrap();
    path
}

fn run_args(args: &[&str]) -> ExitCode {
    let mut argv = vec!["core16"];
    argv.extend_from_slice(args);
    cli::run(Cli::try_parse_from(argv).unwrap())
}

fn same_code(actual: ExitCode, expected: u8) -> bool {
    format!("{actual:?}") == format!("{:?}", ExitCode::from(expected))
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

const VALID_INI: &str = r#"
[engine]
resample = daily
parallel = true

[sma]
periods = 5, 20

[ema]
periods = 10

[macd]
short = 8
long = 17
signal = 9

[rsi]
period = 10
smoothing = wilder

[thresholds]
rsi_oversold = 25
rsi_overbought = 75
adx_trend = 20
"#;

mod config_loading {
    use super::*;

    #[test]
    fn load_config_reads_sections() {
        let file = write_temp_ini(VALID_INI);
        let config = cli::load_config(Some(&file.path().to_path_buf())).unwrap();

        assert_eq!(config.engine.resample, Resample::Daily);
        assert!(config.engine.parallel);
        assert_eq!(config.indicators.sma_periods, vec![5, 20]);
        assert_eq!(config.indicators.ema_periods, vec![10]);
        assert_eq!(config.indicators.macd_short, 8);
        assert_eq!(config.indicators.macd_long, 17);
        assert!((config.thresholds.rsi.oversold - 25.0).abs() < f64::EPSILON);
        assert!((config.thresholds.adx_trend - 20.0).abs() < f64::EPSILON);
        // untouched sections keep defaults
        assert_eq!(config.indicators.cci_period, 20);
    }

    #[test]
    fn missing_file_is_config_parse_error() {
        let err = cli::load_config(Some(&PathBuf::from("/nonexistent/core16.ini"))).unwrap_err();
        assert!(matches!(err, Core16Error::ConfigParse { .. }));
    }

    #[test]
    fn invalid_values_are_config_invalid() {
        let file = write_temp_ini("[macd]\nshort = 30\nlong = 10\n");
        let err = cli::load_config(Some(&file.path().to_path_buf())).unwrap_err();
        assert!(matches!(
            err,
            Core16Error::ConfigInvalid { ref section, .. } if section == "macd"
        ));
    }
}

mod validate_command {
    use super::*;

    #[test]
    fn valid_config_exits_zero() {
        let file = write_temp_ini(VALID_INI);
        let code = run_args(&["validate", "--config", path_str(file.path())]);
        assert!(same_code(code, 0));
    }

    #[test]
    fn invalid_config_exits_two() {
        let file = write_temp_ini("[psar]\naf_start = 0.5\naf_max = 0.2\n");
        let code = run_args(&["validate", "-c", path_str(file.path())]);
        assert!(same_code(code, 2));
    }

    #[test]
    fn unknown_smoothing_exits_two() {
        let file = write_temp_ini("[rsi]\nsmoothing = fancy\n");
        let code = run_args(&["validate", "-c", path_str(file.path())]);
        assert!(same_code(code, 2));
    }
}

mod run_command {
    use super::*;

    #[test]
    fn writes_indicator_and_signal_tables() {
        let dir = TempDir::new().unwrap();
        let input = write_prices(&dir, &generate_wave("2024-01-01", 120));
        let ini = write_temp_ini(VALID_INI);
        let ind_out = dir.path().join("indicators.csv");
        let sig_out = dir.path().join("signals.csv");

        let code = run_args(&[
            "run",
            "--input",
            path_str(&input),
            "--config",
            path_str(ini.path()),
            "--indicators",
            path_str(&ind_out),
            "--signals",
            path_str(&sig_out),
        ]);
        assert!(same_code(code, 0));

        let indicators = fs::read_to_string(&ind_out).unwrap();
        let header = indicators.lines().next().unwrap();
        assert!(header.starts_with("Date,SMA(5),SMA(20),EMA(10)"));
        assert_eq!(indicators.lines().count(), 121);
        // SMA(5) is empty until the fifth row
        let second = indicators.lines().nth(1).unwrap();
        assert!(second.starts_with("2024-01-01,,"));

        let signals = fs::read_to_string(&sig_out).unwrap();
        let mut lines = signals.lines();
        assert!(lines.next().unwrap().starts_with("Date,SMA(5),SMA(20),EMA(10)"));
        for line in lines {
            for field in line.split(',').skip(1) {
                assert!(["-1", "0", "1"].contains(&field), "{line}");
            }
        }
    }

    #[test]
    fn weekly_resample_flag() {
        let dir = TempDir::new().unwrap();
        let input = write_prices(&dir, &generate_bars("2024-01-01", 60, 50.0));
        let out = dir.path().join("weekly.csv");

        let code = run_args(&[
            "indicators",
            "-i",
            path_str(&input),
            "-o",
            path_str(&out),
            "--resample",
            "weekly",
        ]);
        assert!(same_code(code, 0));

        let written = fs::read_to_string(&out).unwrap();
        let first_row = written.lines().nth(1).unwrap();
        assert!(first_row.starts_with("2024-01-05,"));
    }

    #[test]
    fn start_and_end_restrict_input() {
        let dir = TempDir::new().unwrap();
        let input = write_prices(&dir, &generate_bars("2024-01-01", 60, 50.0));
        let out = dir.path().join("ranged.csv");

        let code = run_args(&[
            "indicators",
            "-i",
            path_str(&input),
            "-o",
            path_str(&out),
            "--start",
            "2024-01-11",
            "--end",
            "2024-01-20",
        ]);
        assert!(same_code(code, 0));

        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written.lines().count(), 11);
        assert!(written.lines().nth(1).unwrap().starts_with("2024-01-11,"));
    }

    #[test]
    fn missing_input_file_exits_one() {
        let code = run_args(&["run", "--input", "/nonexistent/prices.csv"]);
        assert!(same_code(code, 1));
    }

    #[test]
    fn malformed_prices_exit_three() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.csv");
        fs::write(&input, "date,open,high,low,close\n2024-01-01,1,2,0.5,1.5\n").unwrap();
        let code = run_args(&["run", "--input", path_str(&input)]);
        assert!(same_code(code, 3));
    }

    #[test]
    fn malformed_price_row_still_succeeds() {
        let dir = TempDir::new().unwrap();
        let bars = generate_bars("2024-01-01", 40, 50.0);
        let mut content = csv_content(&bars);
        // blank the high of the third data row
        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
        let mut fields: Vec<String> = lines[3].split(',').map(str::to_string).collect();
        fields[2] = String::new();
        lines[3] = fields.join(",");
        content = lines.join("\n") + "\n";
        let input = dir.path().join("prices.csv");
        fs::write(&input, content).unwrap();
        let out = dir.path().join("ind.csv");

        let code = run_args(&["indicators", "-i", path_str(&input), "-o", path_str(&out)]);
        assert!(same_code(code, 0));
        assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 41);
    }

    #[test]
    fn duplicate_dates_exit_three() {
        let dir = TempDir::new().unwrap();
        let bars = vec![make_bar("2024-01-02", 10.0), make_bar("2024-01-02", 11.0)];
        let input = write_prices(&dir, &bars);
        let code = run_args(&["run", "--input", path_str(&input)]);
        assert!(same_code(code, 3));
    }

    #[test]
    fn short_history_still_succeeds() {
        let dir = TempDir::new().unwrap();
        let input = write_prices(&dir, &generate_bars("2024-01-01", 8, 50.0));
        let code = run_args(&["run", "--input", path_str(&input)]);
        assert!(same_code(code, 0));
    }
}
