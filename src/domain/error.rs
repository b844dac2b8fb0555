//! Domain error types.

/// Top-level error type for stockwatch.
#[derive(Debug, thiserror::Error)]
pub enum StockwatchError {
    #[error("no data for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("malformed data in {file}: {reason}")]
    DataFormat { file: String, reason: String },

    #[error("invalid bar series for {symbol}: {source}")]
    InvalidSeries {
        symbol: String,
        source: crate::domain::bar::SeriesError,
    },

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

    #[error("failed to write {path}: {reason}")]
    Store { path: String, reason: String },

    #[error("failed to encode alerts: {reason}")]
    Encode { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockwatchError> for std::process::ExitCode {
    fn from(err: &StockwatchError) -> Self {
        let code: u8 = match err {
            StockwatchError::Io(_) => 1,
            StockwatchError::ConfigParse { .. }
            | StockwatchError::ConfigMissing { .. }
            | StockwatchError::ConfigInvalid { .. } => 2,
            StockwatchError::DataUnavailable { .. } | StockwatchError::DataFormat { .. } => 3,
            StockwatchError::InvalidSeries { .. } => 4,
            StockwatchError::Store { .. } | StockwatchError::Encode { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
