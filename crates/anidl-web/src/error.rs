//! Internal error types for web operations.
//!
//! These errors are internal to `anidl-web` and are mapped to core
//! `DownloadError` at the port boundary.

use anidl_core::DownloadError;
use thiserror::Error;

/// Result type alias for web operations.
pub type WebResult<T> = Result<T, WebError>;

#[derive(Debug, Error)]
pub enum WebError {
    /// Request failed with an HTTP error status.
    #[error("Request failed with status {status}: {url}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A built-in CSS selector failed to parse.
    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector {
        selector: &'static str,
        message: String,
    },
}

impl From<WebError> for DownloadError {
    fn from(err: WebError) -> Self {
        match err {
            WebError::RequestFailed { status, url } => {
                Self::network_with_status(format!("request to {url} failed"), status)
            }
            WebError::Network(e) if e.is_timeout() => {
                Self::network(format!("request timed out: {e}"))
            }
            WebError::Network(e) => match e.status() {
                Some(status) => Self::network_with_status(e.to_string(), status.as_u16()),
                None => Self::network(e.to_string()),
            },
            WebError::InvalidSelector { selector, message } => {
                Self::other(format!("Invalid selector '{selector}': {message}"))
            }
        }
    }
}
