//! Ordered download consumer.
//!
//! Pops resolved links in FIFO order and streams each one to disk before
//! taking the next.
//!
//! # Design Principles
//!
//! - Filenames come from the item's episode number, never from the delivery
//!   counter; the counter only feeds "n of m" progress messages
//! - A failed item is recorded and the loop moves on
//! - Cancellation is handled via `tokio::select!` around every await
//! - Opening the media response and every chunk read share one stall timeout
//! - Partial files are left on disk when an item fails or is cancelled

mod paths;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

use anidl_core::{
    DownloadError, DownloadProgress, EpisodeOutcome, EpisodeRange, MediaTransport, ProgressSink,
    ResolvedItem,
};

use crate::config::DownloadConfig;
use crate::progress::ProgressThrottle;
use crate::queue::DownloadQueue;

pub use paths::DownloadDestination;

/// Downloads queued items one at a time, in queue order.
pub struct OrderedDownloadConsumer {
    queue: Arc<DownloadQueue>,
    transport: Arc<dyn MediaTransport>,
    progress: Arc<dyn ProgressSink>,
    destination: DownloadDestination,
    range: EpisodeRange,
    chunk_timeout: Duration,
    throttle: ProgressThrottle,
    cancel: CancellationToken,
}

impl OrderedDownloadConsumer {
    pub fn new(
        queue: Arc<DownloadQueue>,
        transport: Arc<dyn MediaTransport>,
        progress: Arc<dyn ProgressSink>,
        destination: DownloadDestination,
        range: EpisodeRange,
        config: &DownloadConfig,
    ) -> Self {
        Self {
            queue,
            transport,
            progress,
            destination,
            range,
            chunk_timeout: config.chunk_timeout(),
            throttle: ProgressThrottle::new(config.progress_interval()),
            cancel: CancellationToken::new(),
        }
    }

    /// Stop at the next suspension point once `cancel` fires.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Process up to `range.len()` items.
    ///
    /// Returns early when the queue is closed and drained or the run is
    /// cancelled. Outcomes are in delivery order.
    pub async fn run(mut self) -> Vec<(u32, EpisodeOutcome)> {
        let expected = self.range.len();
        let mut delivered = 0u32;
        let mut outcomes = Vec::new();

        while delivered < expected {
            let item = tokio::select! {
                biased;

                () = self.cancel.cancelled() => break,
                item = self.queue.pop() => item,
            };
            let Some(item) = item else {
                tracing::debug!(delivered, expected, "Queue closed, consumer finished");
                break;
            };

            delivered += 1;
            let episode = item.episode;
            let file_name = self.destination.file_name(episode, &self.range);
            tracing::debug!(
                episode,
                position = delivered,
                expected,
                file = %file_name,
                quality = %item.tier,
                "Starting download for episode"
            );
            self.progress
                .episode_started(episode, delivered, expected, &file_name);

            let outcome = match self.download(&item, &file_name).await {
                Ok(bytes) => {
                    tracing::debug!(episode, bytes, "Episode downloaded");
                    EpisodeOutcome::Downloaded {
                        path: self.destination.path_for(&file_name),
                        bytes,
                    }
                }
                Err(err) if err.is_cancelled() => {
                    tracing::debug!(episode, "Episode download interrupted by cancellation");
                    EpisodeOutcome::Cancelled
                }
                Err(err) => {
                    tracing::warn!(episode, url = %item.url, error = %err, "Episode download failed");
                    EpisodeOutcome::Failed(err.to_string())
                }
            };

            let cancelled = outcome.is_cancelled();
            self.progress.episode_finished(episode, &outcome);
            outcomes.push((episode, outcome));

            if cancelled {
                break;
            }
        }

        outcomes
    }

    /// Stream one item to disk, returning the number of bytes written.
    async fn download(&mut self, item: &ResolvedItem, file_name: &str) -> Result<u64, DownloadError> {
        self.destination.ensure_dir().await?;

        let stream = tokio::select! {
            biased;

            () = self.cancel.cancelled() => return Err(DownloadError::Cancelled),
            opened = tokio::time::timeout(self.chunk_timeout, self.transport.open(&item.url)) => {
                opened.map_err(|_elapsed| {
                    DownloadError::timeout(
                        "waiting for the media response",
                        self.chunk_timeout.as_secs(),
                    )
                })??
            }
        };
        if !stream.is_success() {
            return Err(DownloadError::network_with_status(
                format!("server returned HTTP {}", stream.status),
                stream.status,
            ));
        }

        let path = self.destination.path_for(file_name);
        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| DownloadError::from_io_error(&e))?;

        let total = stream.content_length;
        let streamed = self.copy_body(&mut file, stream.body, item.episode, total).await;
        // Flush even after a failure so the partial file holds what arrived.
        let flushed = file
            .flush()
            .await
            .map_err(|e| DownloadError::from_io_error(&e));
        let written = streamed?;
        flushed?;

        Ok(written)
    }

    /// Write body chunks to `file` until the stream ends.
    async fn copy_body(
        &mut self,
        file: &mut tokio::fs::File,
        mut body: BoxStream<'static, Result<Bytes, DownloadError>>,
        episode: u32,
        total: Option<u64>,
    ) -> Result<u64, DownloadError> {
        let mut written = 0u64;
        let mut last_reported = None;
        self.throttle.reset();

        loop {
            let next = tokio::select! {
                biased;

                () = self.cancel.cancelled() => return Err(DownloadError::Cancelled),
                next = tokio::time::timeout(self.chunk_timeout, body.next()) => next,
            };
            let chunk = match next {
                Err(_elapsed) => {
                    return Err(DownloadError::timeout(
                        "reading the media stream",
                        self.chunk_timeout.as_secs(),
                    ));
                }
                Ok(None) => break,
                Ok(Some(chunk)) => chunk?,
            };

            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::from_io_error(&e))?;
            written += chunk.len() as u64;

            let update = DownloadProgress::new(written, total);
            if self.throttle.should_emit(update) {
                self.progress.progress(episode, update);
                last_reported = Some(written);
            }
        }

        if last_reported != Some(written) {
            self.progress
                .progress(episode, DownloadProgress::new(written, total));
        }

        Ok(written)
    }
}
