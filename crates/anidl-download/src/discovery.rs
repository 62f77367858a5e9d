//! Title discovery.
//!
//! Fetches the title page once to learn how many episodes exist. This is the
//! only step whose failure ends the run.

use anidl_core::{DownloadError, PageFetcher, PageParser, TitleUrl};

/// What is known about a title before any episode is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleInfo {
    /// Display name, used as the filename prefix.
    pub name: String,
    /// Number of episodes the series has.
    pub total_episodes: u32,
    /// Title page; episode page URLs are derived from it on demand.
    pub url: TitleUrl,
}

/// Fetch the title page and read the episode count.
///
/// # Errors
///
/// Returns the fetch error when the title page cannot be retrieved, and
/// `DownloadError::EpisodeCountUnavailable` when the page holds no episode
/// count (or a count of zero).
pub async fn discover_title(
    fetcher: &dyn PageFetcher,
    parser: &dyn PageParser,
    title: &TitleUrl,
) -> Result<TitleInfo, DownloadError> {
    let html = fetcher.fetch_page(title.as_str()).await.map_err(|err| {
        tracing::error!(url = %title, error = %err, "Failed to fetch title page");
        err
    })?;

    let total_episodes = parser
        .episode_count(&html)
        .filter(|count| *count > 0)
        .ok_or_else(|| {
            tracing::error!(url = %title, "Failed to retrieve the number of episodes");
            DownloadError::episode_count_unavailable(title.as_str())
        })?;

    tracing::debug!(title = title.name(), total_episodes, "Discovered title");

    Ok(TitleInfo {
        name: title.name().to_string(),
        total_episodes,
        url: title.clone(),
    })
}
