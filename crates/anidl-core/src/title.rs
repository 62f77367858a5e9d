//! Title URL handling.
//!
//! A title page lives at `<host>/titles/<slug>`; its episodes live at
//! `<host>/episode/<slug>/<n>`.

use std::fmt;

use url::Url;

use crate::episode::DownloadError;

const TITLES_SEGMENT: &str = "titles";
const EPISODE_SEGMENT: &str = "episode";

/// A parsed title page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleUrl {
    url: Url,
    name: String,
    episode_base: String,
}

impl TitleUrl {
    /// Parse and validate a title page URL.
    ///
    /// The path must contain a `titles` segment followed by the title slug.
    /// Query and fragment are ignored when building episode URLs.
    pub fn parse(raw: &str) -> Result<Self, DownloadError> {
        let raw = raw.trim();
        let url =
            Url::parse(raw).map_err(|e| DownloadError::invalid_title_url(raw, e.to_string()))?;

        let segments: Vec<&str> = url
            .path_segments()
            .ok_or_else(|| DownloadError::invalid_title_url(raw, "URL has no path"))?
            .filter(|segment| !segment.is_empty())
            .collect();

        let titles_at = segments
            .iter()
            .position(|segment| *segment == TITLES_SEGMENT)
            .ok_or_else(|| {
                DownloadError::invalid_title_url(raw, "path has no '/titles/' segment")
            })?;

        let slug = segments
            .get(titles_at + 1)
            .ok_or_else(|| DownloadError::invalid_title_url(raw, "missing title after '/titles/'"))?;

        let name = urlencoding::decode(slug).map_or_else(|_| (*slug).to_string(), |s| s.into_owned());

        // Segments are still percent-encoded here, so they are joined as-is.
        let episode_path: String = segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                let segment = if i == titles_at {
                    EPISODE_SEGMENT
                } else {
                    *segment
                };
                format!("/{segment}")
            })
            .collect();

        let mut episode_url = url.clone();
        episode_url.set_query(None);
        episode_url.set_fragment(None);
        episode_url.set_path(&episode_path);

        Ok(Self {
            episode_base: episode_url.to_string(),
            url,
            name,
        })
    }

    /// The URL as given.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Title name taken from the slug, percent-decoded.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Page URL of a single episode.
    pub fn episode_url(&self, episode: u32) -> String {
        format!("{}/{episode}", self.episode_base)
    }
}

impl fmt::Display for TitleUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
