//! HTML parse port.
//!
//! Parsers only locate page regions and pull out raw text and links.
//! Classifying labels into quality tiers happens in the resolver.

/// One labelled download option found on an episode page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityOption {
    /// Raw label text, untrimmed.
    pub label: String,
    /// `href` of the anchor next to the label, if there is one.
    pub href: Option<String>,
}

impl QualityOption {
    pub fn new(label: impl Into<String>, href: Option<impl Into<String>>) -> Self {
        Self {
            label: label.into(),
            href: href.map(Into::into),
        }
    }
}

/// Extracts structured data from title and episode pages.
pub trait PageParser: Send + Sync {
    /// Total number of episodes listed on a title page.
    fn episode_count(&self, html: &str) -> Option<u32>;

    /// Download options on an episode page.
    ///
    /// Returns `None` when the page has no download-options container and
    /// `Some(vec![])` when the container exists but is empty.
    fn quality_options(&self, html: &str) -> Option<Vec<QualityOption>>;
}
