//! HTML parsing adapter backed by scraper.
//!
//! `scraper::Html` is not `Send`, so every document is parsed and dropped
//! inside a single synchronous call.

use anidl_core::{PageParser, QualityOption};
use scraper::{ElementRef, Html, Selector};

use crate::error::{WebError, WebResult};

/// Paragraphs on a title page; the second one holds the episode count.
const EPISODE_COUNT_SELECTOR: &str = "p.text-lg.leading-relaxed";
const EPISODE_COUNT_INDEX: usize = 1;

/// Container wrapping the download options of an episode page.
const DOWNLOAD_SECTION_SELECTOR: &str = "div.flex-grow.flex.flex-wrap.gap-4.justify-center";
const LABEL_SELECTOR: &str = "label";
const ANCHOR_SELECTOR: &str = "a";

/// Page parser for the title and episode page layout.
#[derive(Debug)]
pub struct ScraperPageParser {
    episode_count: Selector,
    download_section: Selector,
    label: Selector,
    anchor: Selector,
}

impl ScraperPageParser {
    /// Compile the page selectors.
    pub fn new() -> WebResult<Self> {
        Ok(Self {
            episode_count: compile(EPISODE_COUNT_SELECTOR)?,
            download_section: compile(DOWNLOAD_SECTION_SELECTOR)?,
            label: compile(LABEL_SELECTOR)?,
            anchor: compile(ANCHOR_SELECTOR)?,
        })
    }

    /// First `a` under the label's parent that carries an `href`.
    fn sibling_href(&self, label: ElementRef<'_>) -> Option<String> {
        let parent = label.parent().and_then(ElementRef::wrap)?;
        parent
            .select(&self.anchor)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .map(str::to_string)
    }
}

fn compile(selector: &'static str) -> WebResult<Selector> {
    Selector::parse(selector).map_err(|e| WebError::InvalidSelector {
        selector,
        message: e.to_string(),
    })
}

impl PageParser for ScraperPageParser {
    fn episode_count(&self, html: &str) -> Option<u32> {
        let document = Html::parse_document(html);
        let paragraph = document
            .select(&self.episode_count)
            .nth(EPISODE_COUNT_INDEX)?;
        let text: String = paragraph.text().collect();
        text.trim().parse().ok()
    }

    fn quality_options(&self, html: &str) -> Option<Vec<QualityOption>> {
        let document = Html::parse_document(html);
        let section = document.select(&self.download_section).next()?;

        let options = section
            .select(&self.label)
            .map(|label| QualityOption {
                label: label.text().collect(),
                href: self.sibling_href(label),
            })
            .collect();
        Some(options)
    }
}
