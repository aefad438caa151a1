//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for stockadvisor.
///
/// The first four variants are the simulation taxonomy: `DataUnavailable` is
/// recoverable (one ticker/day gap, absorbed by the caller), the next three
/// abort either one advisor's run or, for `InvalidAllocation`, every run.
#[derive(Debug, thiserror::Error)]
pub enum StockAdvisorError {
    #[error("no price bar for {ticker} on {date}")]
    DataUnavailable { ticker: String, date: NaiveDate },

    #[error("no historical data for {ticker} at or before {date}")]
    NoHistoricalData { ticker: String, date: NaiveDate },

    #[error("advisor {advisor} cannot run on this portfolio: {reason}")]
    UnsupportedPortfolio { advisor: String, reason: String },

    #[error("invalid allocation: {reason}")]
    InvalidAllocation { reason: String },

    #[error("unknown advisor: {name}")]
    UnknownAdvisor { name: String },

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

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockAdvisorError {
    /// Process exit code for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            StockAdvisorError::Io(_) => 1,
            StockAdvisorError::ConfigParse { .. }
            | StockAdvisorError::ConfigMissing { .. }
            | StockAdvisorError::ConfigInvalid { .. } => 2,
            StockAdvisorError::Data { .. } => 3,
            StockAdvisorError::InvalidAllocation { .. }
            | StockAdvisorError::UnknownAdvisor { .. } => 4,
            StockAdvisorError::DataUnavailable { .. }
            | StockAdvisorError::NoHistoricalData { .. }
            | StockAdvisorError::UnsupportedPortfolio { .. } => 5,
        }
    }
}

impl From<&StockAdvisorError> for std::process::ExitCode {
    fn from(err: &StockAdvisorError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
