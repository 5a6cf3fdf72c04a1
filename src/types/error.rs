use crate::types::Period;
use thiserror::Error;

/// homewatt error types
#[derive(Error, Debug)]
pub enum HomewattError {
    /// Failed to parse JSON or a period key
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Requested a chart series for a period with no bucketing rule
    #[error("no chart series defined for period '{0}'")]
    UnsupportedPeriod(Period),
}

/// Result type alias for homewatt
pub type Result<T> = std::result::Result<T, HomewattError>;
