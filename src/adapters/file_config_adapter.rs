//! INI file configuration adapter.

use crate::domain::error::Core16Error;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Core16Error> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| Core16Error::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_sections() {
        let content = r#"
[engine]
resample = weekly

[rsi]
period = 14
smoothing = wilder
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("engine", "resample"),
            Some("weekly".to_string())
        );
        assert_eq!(
            adapter.get_string("rsi", "smoothing"),
            Some("wilder".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[cci]\nperiod = 20\n").unwrap();
        assert_eq!(adapter.get_string("cci", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "period"), None);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let adapter = FileConfigAdapter::from_string("[Engine]\nParallel = Off\n").unwrap();
        assert_eq!(
            adapter.get_string("engine", "parallel"),
            Some("Off".to_string())
        );
    }

    #[test]
    fn get_list_splits_on_commas() {
        let adapter =
            FileConfigAdapter::from_string("[sma]\nperiods = 5, 10 ,,20\n[ema]\nperiods =\n")
                .unwrap();
        assert_eq!(
            adapter.get_list("sma", "periods"),
            Some(vec!["5".to_string(), "10".to_string(), "20".to_string()])
        );
        assert_eq!(adapter.get_list("wma", "periods"), None);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[pivot]\nscale = 1.5\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_string("pivot", "scale"), Some("1.5".to_string()));
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/path/core16.ini").unwrap_err();
        assert!(matches!(
            err,
            Core16Error::ConfigParse { ref file, .. } if file == "/nonexistent/path/core16.ini"
        ));
    }
}
