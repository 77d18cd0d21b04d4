//! Domain error types.

/// Top-level error type for core16.
#[derive(Debug, thiserror::Error)]
pub enum Core16Error {
    #[error("invalid price input: {reason}")]
    Input { reason: String },

    #[error("insufficient history for {column}: window {window}, have {bars} bars")]
    InsufficientHistory {
        column: String,
        window: usize,
        bars: usize,
    },

    #[error("signal {signal} requires missing column {column}")]
    MissingColumn { signal: String, column: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Core16Error {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        Core16Error::Input {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Core16Error::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&Core16Error> for std::process::ExitCode {
    fn from(err: &Core16Error) -> Self {
        let code: u8 = match err {
            Core16Error::Io(_) | Core16Error::Csv(_) => 1,
            Core16Error::ConfigParse { .. }
            | Core16Error::ConfigMissing { .. }
            | Core16Error::ConfigInvalid { .. } => 2,
            Core16Error::Input { .. } | Core16Error::InsufficientHistory { .. } => 3,
            Core16Error::MissingColumn { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
