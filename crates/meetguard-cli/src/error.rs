//! CLI error types.

use meetguard_core::{TimeError, TracingError};
use meetguard_notify::NotifyError;
use meetguard_providers::ProviderError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that end a check run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, malformed or incomplete.
    #[error("configuration error: {0}")]
    Config(String),

    /// Arguments that parse but do not make sense together.
    #[error("invalid arguments: {0}")]
    Usage(#[from] TimeError),

    /// No usable credential could be obtained.
    #[error("authentication failed: {0}")]
    Authentication(#[source] ProviderError),

    /// A calendar API call failed.
    #[error("calendar access failed: {0}")]
    CalendarAccess(#[source] ProviderError),

    /// The reminder could not be composed or delivered.
    #[error("reminder delivery failed: {0}")]
    Delivery(#[from] NotifyError),

    /// The log file could not be set up.
    #[error("logging setup failed: {0}")]
    Log(#[from] TracingError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Exit status for this error: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            _ => 1,
        }
    }
}

impl From<ProviderError> for CliError {
    fn from(err: ProviderError) -> Self {
        if err.is_authentication() {
            Self::Authentication(err)
        } else {
            Self::CalendarAccess(err)
        }
    }
}
