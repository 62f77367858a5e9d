//! HTTP adapter backed by reqwest.
//!
//! One shared `reqwest::Client` serves both page fetches (producer) and media
//! streams (consumer). The client is immutable after construction.

use std::time::Duration;

use anidl_core::{DownloadError, MediaStream, MediaTransport, PageFetcher};
use async_trait::async_trait;
use futures_util::StreamExt;

use crate::config::WebClientConfig;
use crate::error::{WebError, WebResult};

/// Page fetcher and media transport over reqwest.
///
/// Page fetches are bounded by the configured request timeout and retried
/// with exponential backoff for 5xx and network errors. Media requests only
/// get the connect timeout; the consumer bounds stalled reads itself.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
    request_timeout: Duration,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl ReqwestClient {
    /// Build a client from configuration.
    pub fn new(config: &WebClientConfig) -> Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(WebError::from)?;

        Ok(Self {
            client,
            request_timeout: config.request_timeout,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    /// Fetch a page with automatic retry for transient errors.
    async fn fetch_with_retry(&self, url: &str) -> WebResult<reqwest::Response> {
        let mut attempt: u8 = 0;
        loop {
            if attempt > 0 {
                let factor = 2u32.saturating_pow(u32::from(attempt) - 1);
                let delay = self.retry_base_delay.saturating_mul(factor);
                tracing::debug!(url, attempt, ?delay, "Retrying page fetch");
                tokio::time::sleep(delay).await;
            }

            let result = self
                .client
                .get(url)
                .timeout(self.request_timeout)
                .send()
                .await;

            let retries_left = attempt < self.max_retries;
            match result {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && retries_left {
                        attempt += 1;
                        continue;
                    }
                    return Err(WebError::RequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) if retries_left => {
                    tracing::debug!(url, error = %e, "Page fetch failed");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[async_trait]
impl PageFetcher for ReqwestClient {
    async fn fetch_page(&self, url: &str) -> Result<String, DownloadError> {
        let response = self.fetch_with_retry(url).await?;
        let body = response.text().await.map_err(WebError::from)?;
        Ok(body)
    }
}

#[async_trait]
impl MediaTransport for ReqwestClient {
    async fn open(&self, url: &str) -> Result<MediaStream, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(WebError::from)?;

        let status = response.status().as_u16();
        let content_length = response.content_length();
        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| DownloadError::from(WebError::from(e))))
            .boxed();

        Ok(MediaStream {
            status,
            content_length,
            body,
        })
    }
}
