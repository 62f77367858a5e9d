//! Public configuration for the web client.

use std::time::Duration;

/// User agent sent when none is configured.
///
/// The site rejects obviously scripted clients, so a desktop browser string
/// is the default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Configuration for [`ReqwestClient`](crate::ReqwestClient).
///
/// # Example
///
/// ```
/// use anidl_web::WebClientConfig;
/// use std::time::Duration;
///
/// let config = WebClientConfig::new()
///     .with_request_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct WebClientConfig {
    /// User agent string for every request
    pub(crate) user_agent: String,
    /// Whole-request deadline for page fetches
    pub(crate) request_timeout: Duration,
    /// Connection deadline for pages and media
    pub(crate) connect_timeout: Duration,
    /// Retry attempts for 5xx and network errors on page fetches
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for WebClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(15),
            max_retries: 0,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl WebClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the page fetch deadline.
    ///
    /// Defaults to 30 seconds. Media streams are not bounded by it.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Defaults to 15 seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the number of page fetch retries for transient errors.
    ///
    /// Defaults to 0: a failed page fetch skips the episode.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub const fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WebClientConfig::new();
        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(15));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = WebClientConfig::new()
            .with_user_agent("test-agent")
            .with_request_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(2))
            .with_max_retries(3)
            .with_retry_delay(Duration::from_millis(10));

        assert_eq!(config.user_agent(), "test-agent");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay, Duration::from_millis(10));
    }
}
