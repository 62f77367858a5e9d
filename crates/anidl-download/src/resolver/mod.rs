//! Episode page resolution.
//!
//! Turns one episode page URL into zero or one download link, using the
//! `PageFetcher` and `PageParser` ports. Resolution never fails: every
//! problem becomes a `SkipReason` so later episodes keep resolving.

use std::sync::Arc;

use anidl_core::{
    PageFetcher, PageParser, QualityCandidates, QualityOption, QualityTier, ResolvedItem,
    SkipReason,
};

use crate::quality_selector::select_quality;

/// Outcome of resolving one episode page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A link was chosen.
    Resolved(ResolvedItem),
    /// The episode yields nothing to download.
    Skipped(SkipReason),
}

/// Resolver that fetches and parses episode pages.
#[derive(Clone)]
pub struct EpisodePageResolver {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<dyn PageParser>,
}

impl EpisodePageResolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, parser: Arc<dyn PageParser>) -> Self {
        Self { fetcher, parser }
    }

    /// Resolve one episode page to a download link for `preferred` or lower.
    pub async fn resolve(&self, episode: u32, url: &str, preferred: QualityTier) -> Resolution {
        let html = match self.fetcher.fetch_page(url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(episode, url, error = %err, "Failed to fetch episode page");
                return Resolution::Skipped(SkipReason::PageUnavailable {
                    message: err.to_string(),
                });
            }
        };

        let Some(options) = self.parser.quality_options(&html) else {
            tracing::warn!(
                episode,
                url,
                "Failed to find download links section for episode"
            );
            return Resolution::Skipped(SkipReason::NoDownloadSection);
        };

        let candidates = collect_candidates(options);
        if candidates.is_empty() {
            tracing::warn!(episode, url, "No download links found for episode");
            return Resolution::Skipped(SkipReason::NoLinksFound);
        }

        let Some(selection) = select_quality(&candidates, preferred) else {
            tracing::warn!(
                episode,
                url,
                preferred = %preferred,
                "Could not find a suitable download link (tried preferred quality and lower)"
            );
            return Resolution::Skipped(SkipReason::NoSuitableQuality { preferred });
        };

        if selection.fallback {
            tracing::info!(
                episode,
                preferred = %preferred,
                substituted = %selection.tier,
                "Preferred quality not found, downloading a lower quality instead"
            );
        } else {
            tracing::debug!(episode, quality = %selection.tier, "Resolved episode link");
        }

        Resolution::Resolved(ResolvedItem::new(episode, selection.url, selection.tier))
    }
}

/// Classify labelled options into tiers. Options without a link or with an
/// unrecognized label are ignored; a later option for the same tier replaces
/// an earlier one.
fn collect_candidates(options: Vec<QualityOption>) -> QualityCandidates {
    options
        .into_iter()
        .filter_map(|option| {
            let href = option.href?;
            let tier = QualityTier::classify_label(&option.label)?;
            Some((tier, href))
        })
        .collect()
}
