//! End-to-end pipeline tests against an in-memory site.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anidl_core::{
    DownloadError, DownloadProgress, EpisodeOutcome, EpisodeRange, MediaStream, MediaTransport,
    PageFetcher, PageParser, ProgressSink, QualityOption, QualityTier, SkipReason, TitleUrl,
};
use anidl_download::{
    DownloadConfig, DownloadRequest, PipelineDeps, RunSummary, discover_title, run_pipeline,
};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

const TITLE_URL: &str = "https://anime.example/titles/naruto";

/// What the media server does for one URL.
#[derive(Clone)]
enum Media {
    Ok(Vec<Vec<u8>>),
    Status(u16),
    Stall(Vec<u8>),
    /// Accepts the request but never answers.
    NoResponse,
}

/// In-memory site.
///
/// Title page body is the episode count. Episode pages are
/// `label=href;label=href`, or `none` for a page without a download section.
#[derive(Default)]
struct FakeSite {
    pages: HashMap<String, String>,
    media: HashMap<String, Media>,
}

impl FakeSite {
    fn new(total: u32) -> Self {
        let mut site = Self::default();
        site.pages.insert(TITLE_URL.to_string(), total.to_string());
        site
    }

    fn episode(mut self, n: u32, page: &str) -> Self {
        self.pages
            .insert(format!("https://anime.example/episode/naruto/{n}"), page.to_string());
        self
    }

    fn media(mut self, url: &str, media: Media) -> Self {
        self.media.insert(url.to_string(), media);
        self
    }

    /// Episodes `range` each with one 720p link serving `ep<n>-a`, `ep<n>-b`.
    fn with_episodes(mut self, range: std::ops::RangeInclusive<u32>) -> Self {
        for n in range {
            let href = format!("media/{n}.mp4");
            self = self.episode(n, &format!("720p={href}"));
            let chunks = vec![format!("ep{n}-a").into_bytes(), format!("ep{n}-b").into_bytes()];
            self = self.media(&href, Media::Ok(chunks));
        }
        self
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn fetch_page(&self, url: &str) -> Result<String, DownloadError> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| DownloadError::network_with_status("not found", 404))
    }
}

#[async_trait]
impl MediaTransport for FakeSite {
    async fn open(&self, url: &str) -> Result<MediaStream, DownloadError> {
        let media = self
            .media
            .get(url)
            .cloned()
            .ok_or_else(|| DownloadError::network(format!("connection refused: {url}")))?;

        Ok(match media {
            Media::NoResponse => futures_util::future::pending().await,
            Media::Ok(chunks) => {
                let len = chunks.iter().map(|c| c.len() as u64).sum();
                MediaStream {
                    status: 200,
                    content_length: Some(len),
                    body: futures_util::stream::iter(
                        chunks.into_iter().map(|c| Ok(Bytes::from(c))),
                    )
                    .boxed(),
                }
            }
            Media::Status(status) => MediaStream {
                status,
                content_length: None,
                body: futures_util::stream::empty().boxed(),
            },
            Media::Stall(first) => MediaStream {
                status: 200,
                content_length: Some(1024),
                body: futures_util::stream::iter([Ok(Bytes::from(first))])
                    .chain(futures_util::stream::pending())
                    .boxed(),
            },
        })
    }
}

/// Delegates to the site, but panics when asked for one episode page.
struct PanicsOnEpisode {
    site: Arc<FakeSite>,
    episode: u32,
}

#[async_trait]
impl PageFetcher for PanicsOnEpisode {
    async fn fetch_page(&self, url: &str) -> Result<String, DownloadError> {
        assert!(
            !url.ends_with(&format!("/episode/naruto/{}", self.episode)),
            "fetcher blew up on {url}"
        );
        self.site.fetch_page(url).await
    }
}

struct FakeParser;

impl PageParser for FakeParser {
    fn episode_count(&self, html: &str) -> Option<u32> {
        html.trim().parse().ok()
    }

    fn quality_options(&self, html: &str) -> Option<Vec<QualityOption>> {
        if html == "none" {
            return None;
        }
        Some(
            html.split(';')
                .filter(|entry| !entry.is_empty())
                .map(|entry| match entry.split_once('=') {
                    Some((label, href)) => QualityOption::new(label, Some(href)),
                    None => QualityOption::new(entry, None::<String>),
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Started {
        episode: u32,
        position: u32,
        expected: u32,
        file: String,
    },
    Progress(u32, DownloadProgress),
    Finished(u32, bool),
}

#[derive(Default)]
struct RecordingProgress {
    events: Mutex<Vec<Event>>,
}

impl RecordingProgress {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn episode_started(&self, episode: u32, position: u32, expected: u32, filename: &str) {
        self.events.lock().unwrap().push(Event::Started {
            episode,
            position,
            expected,
            file: filename.to_string(),
        });
    }

    fn progress(&self, episode: u32, progress: DownloadProgress) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Progress(episode, progress));
    }

    fn episode_finished(&self, episode: u32, outcome: &EpisodeOutcome) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Finished(episode, outcome.is_downloaded()));
    }
}

struct Run {
    summary: RunSummary,
    progress: Arc<RecordingProgress>,
    _tmp: tempfile::TempDir,
    output: std::path::PathBuf,
}

async fn run(site: FakeSite, start: u32, end: u32, config: DownloadConfig) -> Run {
    run_with_cancel(site, start, end, config, CancellationToken::new()).await
}

async fn run_with_cancel(
    site: FakeSite,
    start: u32,
    end: u32,
    config: DownloadConfig,
    cancel: CancellationToken,
) -> Run {
    let tmp = tempfile::tempdir().unwrap();
    let output = tmp.path().join("output");
    let config = config.with_output_dir(&output);

    let site = Arc::new(site);
    let progress = Arc::new(RecordingProgress::default());
    let deps = PipelineDeps {
        fetcher: site.clone(),
        parser: Arc::new(FakeParser),
        transport: site.clone(),
        progress: progress.clone(),
    };

    let title = TitleUrl::parse(TITLE_URL).unwrap();
    let info = discover_title(site.as_ref(), &FakeParser, &title)
        .await
        .unwrap();
    let range = EpisodeRange::new(start, end, info.total_episodes).unwrap();
    let request = DownloadRequest {
        title: info,
        range,
        preferred: QualityTier::Hd720,
    };

    let summary = run_pipeline(&deps, request, &config, cancel).await.unwrap();
    Run {
        summary,
        progress,
        _tmp: tmp,
        output,
    }
}

fn files_in(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_middle_range_is_downloaded_in_order() {
    let site = FakeSite::new(12).with_episodes(1..=12);

    let run = run(site, 3, 5, DownloadConfig::new()).await;

    assert_eq!(
        files_in(&run.output),
        vec![
            "naruto - Episode 3.mp4",
            "naruto - Episode 4.mp4",
            "naruto - Episode 5.mp4",
        ]
    );
    let content = std::fs::read(run.output.join("naruto - Episode 4.mp4")).unwrap();
    assert_eq!(content, b"ep4-aep4-b");
    assert_eq!(run.summary.downloaded(), 3);
    assert!(!run.summary.is_cancelled());

    let started: Vec<_> = run
        .progress
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::Started {
                episode,
                position,
                expected,
                file,
            } => Some((episode, position, expected, file)),
            _ => None,
        })
        .collect();
    assert_eq!(
        started,
        vec![
            (3, 1, 3, "naruto - Episode 3.mp4".to_string()),
            (4, 2, 3, "naruto - Episode 4.mp4".to_string()),
            (5, 3, 3, "naruto - Episode 5.mp4".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_final_episode_carries_end_marker() {
    let site = FakeSite::new(12).with_episodes(10..=12);

    let run = run(site, 10, 12, DownloadConfig::new()).await;

    assert_eq!(
        files_in(&run.output),
        vec![
            "naruto - Episode 10.mp4",
            "naruto - Episode 11.mp4",
            "naruto - Episode 12 [END].mp4",
        ]
    );
}

#[tokio::test]
async fn test_skipped_episode_keeps_later_names_correct() {
    let site = FakeSite::new(12)
        .with_episodes(3..=5)
        .episode(4, "none");

    let run = run(site, 3, 5, DownloadConfig::new()).await;

    assert_eq!(
        files_in(&run.output),
        vec!["naruto - Episode 3.mp4", "naruto - Episode 5.mp4"]
    );
    let content = std::fs::read(run.output.join("naruto - Episode 5.mp4")).unwrap();
    assert_eq!(content, b"ep5-aep5-b");
    assert_eq!(
        run.summary.get(4),
        Some(&EpisodeOutcome::Skipped(SkipReason::NoDownloadSection))
    );
    assert_eq!(run.summary.len(), 3);
}

#[tokio::test]
async fn test_lower_quality_is_substituted() {
    let site = FakeSite::new(1)
        .episode(1, "1080p=media/1080.mp4;480p=media/480.mp4")
        .media("media/480.mp4", Media::Ok(vec![b"low".to_vec()]));

    let run = run(site, 1, 1, DownloadConfig::new()).await;

    let content = std::fs::read(run.output.join("naruto - Episode 1 [END].mp4")).unwrap();
    assert_eq!(content, b"low");
}

#[tokio::test]
async fn test_error_status_fails_item_and_continues() {
    let site = FakeSite::new(12)
        .with_episodes(3..=4)
        .media("media/3.mp4", Media::Status(403));

    let run = run(site, 3, 4, DownloadConfig::new()).await;

    assert!(matches!(run.summary.get(3), Some(EpisodeOutcome::Failed(_))));
    assert!(matches!(
        run.summary.get(4),
        Some(EpisodeOutcome::Downloaded { bytes: 10, .. })
    ));
    assert_eq!(files_in(&run.output), vec!["naruto - Episode 4.mp4"]);
}

#[tokio::test]
async fn test_stalled_stream_times_out_and_continues() {
    let site = FakeSite::new(12)
        .with_episodes(3..=4)
        .media("media/3.mp4", Media::Stall(b"partial".to_vec()));
    let config = DownloadConfig::new().with_chunk_timeout(Duration::from_millis(50));

    let run = run(site, 3, 4, config).await;

    assert!(matches!(run.summary.get(3), Some(EpisodeOutcome::Failed(_))));
    assert!(run.summary.get(4).unwrap().is_downloaded());
    // Partial files are left behind.
    let partial = std::fs::read(run.output.join("naruto - Episode 3.mp4")).unwrap();
    assert_eq!(partial, b"partial");
}

#[tokio::test]
async fn test_progress_is_monotonic_and_completes() {
    let site = FakeSite::new(2).with_episodes(1..=2);

    let run = run(site, 1, 2, DownloadConfig::new()).await;

    for episode in 1..=2 {
        let updates: Vec<DownloadProgress> = run
            .progress
            .events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Progress(ep, p) if ep == episode => Some(p),
                _ => None,
            })
            .collect();

        assert!(!updates.is_empty());
        assert!(updates.windows(2).all(|w| w[0].written <= w[1].written));
        assert_eq!(updates.last().and_then(DownloadProgress::percent), Some(100.0));
    }

    let finished: Vec<_> = run
        .progress
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::Finished(episode, true) => Some(episode),
            _ => None,
        })
        .collect();
    assert_eq!(finished, vec![1, 2]);
}

#[tokio::test]
async fn test_cancelled_run_downloads_nothing() {
    let site = FakeSite::new(3).with_episodes(1..=3);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let run = run_with_cancel(site, 1, 3, DownloadConfig::new(), cancel).await;

    assert!(run.summary.is_cancelled());
    assert_eq!(run.summary.downloaded(), 0);
    assert!(files_in(&run.output).is_empty());
}

#[tokio::test]
async fn test_unanswered_media_request_times_out_and_continues() {
    let site = FakeSite::new(12)
        .with_episodes(3..=4)
        .media("media/3.mp4", Media::NoResponse);
    let config = DownloadConfig::new().with_chunk_timeout(Duration::from_millis(50));

    let run = tokio::time::timeout(Duration::from_secs(5), run(site, 3, 4, config))
        .await
        .expect("run hung on an unanswered media request");

    match run.summary.get(3) {
        Some(EpisodeOutcome::Failed(reason)) => {
            assert!(reason.contains("waiting for the media response"));
        }
        other => panic!("expected a failed episode 3, got {other:?}"),
    }
    assert!(run.summary.get(4).unwrap().is_downloaded());
    assert_eq!(files_in(&run.output), vec!["naruto - Episode 4.mp4"]);
}

#[tokio::test]
async fn test_cancel_mid_download_is_not_a_failure() {
    let site = FakeSite::new(12)
        .with_episodes(3..=4)
        .media("media/3.mp4", Media::Stall(b"partial".to_vec()));
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let run = run_with_cancel(site, 3, 4, DownloadConfig::new(), cancel).await;

    assert!(run.summary.is_cancelled());
    assert_eq!(run.summary.get(3), Some(&EpisodeOutcome::Cancelled));
    assert_eq!(run.summary.failed(), 0);
    assert_eq!(run.summary.get(4), None);
    let partial = std::fs::read(run.output.join("naruto - Episode 3.mp4")).unwrap();
    assert_eq!(partial, b"partial");
}

#[tokio::test]
async fn test_producer_panic_ends_run_with_error() {
    let site = Arc::new(FakeSite::new(2).with_episodes(1..=2));
    let tmp = tempfile::tempdir().unwrap();
    let deps = PipelineDeps {
        fetcher: Arc::new(PanicsOnEpisode {
            site: site.clone(),
            episode: 2,
        }),
        parser: Arc::new(FakeParser),
        transport: site.clone(),
        progress: Arc::new(RecordingProgress::default()),
    };

    let title = TitleUrl::parse(TITLE_URL).unwrap();
    let info = discover_title(site.as_ref(), &FakeParser, &title)
        .await
        .unwrap();
    let range = EpisodeRange::new(1, 2, info.total_episodes).unwrap();
    let request = DownloadRequest {
        title: info,
        range,
        preferred: QualityTier::Hd720,
    };
    let config = DownloadConfig::new().with_output_dir(tmp.path().join("output"));

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        run_pipeline(&deps, request, &config, CancellationToken::new()),
    )
    .await
    .expect("run hung after the producer panicked");

    assert!(result.is_err());
    assert_eq!(files_in(&tmp.path().join("output")), vec!["naruto - Episode 1.mp4"]);
}
