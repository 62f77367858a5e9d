//! Fetch and transport port definitions.
//!
//! Page fetching and media streaming are separate traits: the producer only
//! needs pages, the consumer only needs media streams. One adapter usually
//! implements both.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;

use crate::episode::DownloadError;

/// Fetches HTML pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a page body as text.
    ///
    /// Non-success statuses are reported as `DownloadError::Network` carrying
    /// the status code.
    async fn fetch_page(&self, url: &str) -> Result<String, DownloadError>;
}

/// Opens streamed media downloads.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    /// Send the request and return once response headers arrive.
    ///
    /// Any status is returned as-is; judging it is up to the caller.
    async fn open(&self, url: &str) -> Result<MediaStream, DownloadError>;
}

/// An open media response.
pub struct MediaStream {
    /// HTTP status code.
    pub status: u16,
    /// Declared `Content-Length`, if any.
    pub content_length: Option<u64>,
    /// Body chunks in arrival order.
    pub body: BoxStream<'static, Result<Bytes, DownloadError>>,
}

impl MediaStream {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

impl fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaStream")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
