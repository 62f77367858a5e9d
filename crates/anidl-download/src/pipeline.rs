//! Producer/consumer wiring for one run.
//!
//! The producer runs as a spawned task while the consumer runs on the
//! caller's task. Both share one queue and one cancellation token.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use anidl_core::{
    DownloadError, EpisodeOutcome, EpisodeRange, MediaTransport, PageFetcher, PageParser,
    ProgressSink, QualityTier,
};

use crate::config::DownloadConfig;
use crate::consumer::{DownloadDestination, OrderedDownloadConsumer};
use crate::discovery::TitleInfo;
use crate::producer::LinkResolutionProducer;
use crate::queue::DownloadQueue;
use crate::resolver::EpisodePageResolver;

/// Ports the pipeline runs against.
#[derive(Clone)]
pub struct PipelineDeps {
    pub fetcher: Arc<dyn PageFetcher>,
    pub parser: Arc<dyn PageParser>,
    pub transport: Arc<dyn MediaTransport>,
    pub progress: Arc<dyn ProgressSink>,
}

/// Everything the user chose for one run.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub title: TitleInfo,
    pub range: EpisodeRange,
    pub preferred: QualityTier,
}

/// Per-episode results of a run, keyed by episode number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    outcomes: BTreeMap<u32, EpisodeOutcome>,
    cancelled: bool,
}

impl RunSummary {
    pub fn get(&self, episode: u32) -> Option<&EpisodeOutcome> {
        self.outcomes.get(&episode)
    }

    /// Outcomes in ascending episode order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &EpisodeOutcome)> {
        self.outcomes.iter().map(|(episode, outcome)| (*episode, outcome))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn downloaded(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_downloaded()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_skipped()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.values().filter(|o| o.is_failed()).count()
    }

    /// Whether the run stopped early because it was cancelled.
    pub const fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// Resolve and download `request.range`, returning every episode's outcome.
///
/// Episodes that were never reached because of cancellation are absent from
/// the summary.
///
/// # Errors
///
/// Only if the producer task panics; per-episode problems are reported in
/// the summary instead.
pub async fn run_pipeline(
    deps: &PipelineDeps,
    request: DownloadRequest,
    config: &DownloadConfig,
    cancel: CancellationToken,
) -> Result<RunSummary, DownloadError> {
    let DownloadRequest {
        title,
        range,
        preferred,
    } = request;

    tracing::debug!(
        title = %title.name,
        range = %range,
        quality = %preferred,
        output = %config.output_dir().display(),
        "Starting download run"
    );

    let queue = Arc::new(DownloadQueue::new());

    let resolver = EpisodePageResolver::new(Arc::clone(&deps.fetcher), Arc::clone(&deps.parser));
    let producer = LinkResolutionProducer::new(
        resolver,
        Arc::clone(&queue),
        title.url,
        range,
        preferred,
    )
    .with_cancel(cancel.clone());
    let producer_handle = tokio::spawn(producer.run());

    let consumer = OrderedDownloadConsumer::new(
        Arc::clone(&queue),
        Arc::clone(&deps.transport),
        Arc::clone(&deps.progress),
        DownloadDestination::new(config.output_dir(), title.name),
        range,
        config,
    )
    .with_cancel(cancel.clone());
    let delivered = consumer.run().await;

    // The consumer only stops early on cancellation or a closed queue, and
    // the producer closes the queue as its last step.
    let report = producer_handle
        .await
        .map_err(|e| DownloadError::other(format!("link resolution task failed: {e}")))?;

    let mut outcomes: BTreeMap<u32, EpisodeOutcome> = report
        .skipped
        .into_iter()
        .map(|(episode, reason)| (episode, EpisodeOutcome::Skipped(reason)))
        .collect();
    outcomes.extend(delivered);

    let summary = RunSummary {
        outcomes,
        cancelled: report.cancelled || cancel.is_cancelled(),
    };

    tracing::debug!(
        downloaded = summary.downloaded(),
        skipped = summary.skipped(),
        failed = summary.failed(),
        cancelled = summary.cancelled,
        "Download run finished"
    );

    Ok(summary)
}
