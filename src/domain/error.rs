//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for insidertrader.
#[derive(Debug, thiserror::Error)]
pub enum InsiderError {
    #[error("no configuration found (looked in: {candidates})")]
    ConfigurationMissing { candidates: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("no insider matching {last_name}{}", given_name_suffix(.first_name))]
    UnresolvedInsider {
        last_name: String,
        first_name: Option<String>,
    },

    #[error("no adjusted close on trade date {trade_date}")]
    TradeDateLookup { trade_date: NaiveDate },

    #[error("failed to fetch price history for {ticker}: {reason}")]
    PriceFetch { ticker: String, reason: String },

    #[error("failed to fetch insider trades for {ticker}: {reason}")]
    TradeFetch { ticker: String, reason: String },

    #[error("invalid {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn given_name_suffix(first_name: &Option<String>) -> String {
    first_name
        .as_deref()
        .map(|f| format!(", {f}"))
        .unwrap_or_default()
}

impl InsiderError {
    /// Process exit status for this error kind.
    pub fn exit_status(&self) -> u8 {
        match self {
            InsiderError::Io(_) | InsiderError::Report { .. } => 1,
            InsiderError::ConfigurationMissing { .. } | InsiderError::ConfigParse { .. } => 2,
            InsiderError::TradeFetch { .. } | InsiderError::PriceFetch { .. } => 3,
            InsiderError::InvalidArgument { .. } => 4,
            InsiderError::UnresolvedInsider { .. } | InsiderError::TradeDateLookup { .. } => 5,
        }
    }
}

impl From<&InsiderError> for std::process::ExitCode {
    fn from(err: &InsiderError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
