//! Link resolution producer.
//!
//! Walks the requested range in ascending order, resolves each episode page
//! and pushes the chosen links onto the queue. Skipped episodes are recorded
//! and never enqueued, so the queue only ever holds downloadable items in
//! strictly increasing episode order.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use anidl_core::{EpisodeRange, QualityTier, SkipReason, TitleUrl};

use crate::queue::DownloadQueue;
use crate::resolver::{EpisodePageResolver, Resolution};

/// What the producer did during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerReport {
    /// Number of items pushed onto the queue.
    pub enqueued: u32,
    /// Episodes that yielded no link, in episode order.
    pub skipped: Vec<(u32, SkipReason)>,
    /// Whether the run stopped because of cancellation.
    pub cancelled: bool,
}

/// Closes the queue when dropped, including while unwinding from a panic.
struct CloseOnDrop(Arc<DownloadQueue>);

impl Drop for CloseOnDrop {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// Resolves episode pages and feeds the download queue.
pub struct LinkResolutionProducer {
    resolver: EpisodePageResolver,
    queue: Arc<DownloadQueue>,
    title: TitleUrl,
    range: EpisodeRange,
    preferred: QualityTier,
    cancel: CancellationToken,
}

impl LinkResolutionProducer {
    /// Episode page URLs are derived from `title`.
    pub fn new(
        resolver: EpisodePageResolver,
        queue: Arc<DownloadQueue>,
        title: TitleUrl,
        range: EpisodeRange,
        preferred: QualityTier,
    ) -> Self {
        Self {
            resolver,
            queue,
            title,
            range,
            preferred,
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Resolve every episode of the range, then close the queue.
    ///
    /// The queue is closed on every exit path, panics included.
    pub async fn run(self) -> ProducerReport {
        let _close = CloseOnDrop(Arc::clone(&self.queue));
        let mut report = ProducerReport::default();

        for episode in self.range.episodes() {
            let url = self.title.episode_url(episode);

            let resolution = tokio::select! {
                biased;

                () = self.cancel.cancelled() => {
                    report.cancelled = true;
                    break;
                }
                resolution = self.resolver.resolve(episode, &url, self.preferred) => resolution,
            };

            match resolution {
                Resolution::Resolved(item) => {
                    self.queue.push(item);
                    report.enqueued += 1;
                }
                Resolution::Skipped(reason) => report.skipped.push((episode, reason)),
            }
        }

        tracing::debug!(
            enqueued = report.enqueued,
            skipped = report.skipped.len(),
            cancelled = report.cancelled,
            "Link resolution finished"
        );
        report
    }
}
