//! Download error types.
//!
//! These errors are designed to be serializable and not depend on external
//! error types like `std::io::Error` or `reqwest::Error`. For those, we
//! capture the kind and message as strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for fetch and download operations.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadError {
    /// I/O error during file operations.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "`NotFound`", "`PermissionDenied`").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// Network/HTTP error.
    #[error("Network error: {message}")]
    Network {
        /// Detailed error message.
        message: String,
        /// HTTP status code if available.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },

    /// A request or stream stalled past its deadline.
    #[error("Timed out after {seconds}s: {operation}")]
    Timeout {
        /// What was being waited on.
        operation: String,
        /// The deadline that elapsed.
        seconds: u64,
    },

    /// The title URL does not identify a title page.
    #[error("Invalid title URL '{url}': {reason}")]
    InvalidTitleUrl {
        /// The URL as given.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The title page did not expose a readable episode count.
    #[error("Could not determine the episode count from {url}")]
    EpisodeCountUnavailable {
        /// The title page URL.
        url: String,
    },

    /// The run was cancelled.
    #[error("Download cancelled")]
    Cancelled,

    /// General/uncategorized error.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl DownloadError {
    /// Create an I/O error from kind and message strings.
    pub fn io(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status_code: None,
        }
    }

    pub fn network_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Network {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    pub fn timeout(operation: impl Into<String>, seconds: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            seconds,
        }
    }

    pub fn invalid_title_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTitleUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn episode_count_unavailable(url: impl Into<String>) -> Self {
        Self::EpisodeCountUnavailable { url: url.into() }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// HTTP status code carried by a network error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Network { status_code, .. } => *status_code,
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { message, .. } => format!("File operation failed: {message}"),
            Self::Network {
                message,
                status_code: Some(code),
            } => format!("Network error (HTTP {code}): {message}"),
            Self::Network { message, .. } => format!("Network error: {message}"),
            Self::Timeout { operation, seconds } => {
                format!("No response for {seconds}s while {operation}.")
            }
            Self::InvalidTitleUrl { url, reason } => {
                format!("'{url}' is not a title page URL ({reason}).")
            }
            Self::EpisodeCountUnavailable { url } => {
                format!("Failed to retrieve the episode count from {url}.")
            }
            Self::Cancelled => "Download was cancelled.".to_string(),
            Self::Other { message } => message.clone(),
        }
    }
}

/// Rejected episode range bounds.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("start episode {start} must be between 1 and {total}")]
    StartOutOfBounds { start: u32, total: u32 },

    #[error("end episode {end} must be between {start} and {total}")]
    EndOutOfBounds { start: u32, end: u32, total: u32 },
}

/// Rejected quality preference text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid quality '{value}', expected one of 1080, 720, 480")]
pub struct QualityParseError {
    /// The text as entered, trimmed.
    pub value: String,
}
