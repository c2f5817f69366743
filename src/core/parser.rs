use crate::core::markup::{element_text, resolve_href};
use crate::core::matcher::KeywordMatcher;
use crate::domain::model::Listing;
use scraper::ElementRef;
use url::Url;

/// Everything a parser needs to know about the page it is reading.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Stamped on every listing.
    pub source: &'a str,
    /// The URL the page was fetched from.
    pub base_url: &'a Url,
    pub matcher: &'a KeywordMatcher,
    /// Maximum listings taken from one page.
    pub cap: usize,
}

impl PageContext<'_> {
    /// Title from the anchor text, absolute http(s) link from its href.
    /// `None` when the title is empty, the href cannot be resolved, or the
    /// title is not relevant.
    pub fn listing_from_anchor(&self, anchor: ElementRef<'_>, location: String) -> Option<Listing> {
        let title = element_text(anchor);
        if title.is_empty() {
            return None;
        }
        let href = anchor.value().attr("href")?;
        let url = resolve_href(self.base_url, href)?;
        if !self.matcher.is_match(&title) {
            return None;
        }
        Some(Listing::new(self.source, title, location, url))
    }
}

/// Turns one fetched page into relevant listings. Parsing never fails:
/// anything missing from the markup simply yields fewer listings.
pub trait BoardParser {
    fn parse(&self, html: &str, page: &PageContext<'_>) -> Vec<Listing>;
}
