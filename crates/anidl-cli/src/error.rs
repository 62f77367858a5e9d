//! CLI-specific error types and exit code mapping.

use anidl_core::{DownloadError, QualityParseError, RangeError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The run cannot continue (title page or episode count unavailable).
    #[error("{0}")]
    Fatal(String),

    /// Invalid flag values.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Terminal or filesystem I/O failed.
    #[error("IO error: {0}")]
    Io(String),

    /// Interrupted by the user.
    #[error("Cancelled")]
    Cancelled,
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// - 1: General error
    /// - 2: Invalid arguments (same code clap uses)
    /// - 130: Interrupted (128 + SIGINT)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Fatal(_) | Self::Io(_) => 1,
            Self::Arguments(_) => 2,
            Self::Cancelled => 130,
        }
    }
}

impl From<DownloadError> for CliError {
    fn from(err: DownloadError) -> Self {
        match &err {
            DownloadError::Cancelled => Self::Cancelled,
            DownloadError::InvalidTitleUrl { .. } => Self::Arguments(err.user_message()),
            DownloadError::Io { .. } => Self::Io(err.user_message()),
            _ => Self::Fatal(err.user_message()),
        }
    }
}

impl From<RangeError> for CliError {
    fn from(err: RangeError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<QualityParseError> for CliError {
    fn from(err: QualityParseError) -> Self {
        Self::Arguments(err.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        Self::Io(format!("{err:#}"))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
