use crate::core::convention::AtsConvention;
use crate::core::markup::element_text;
use crate::core::parser::{BoardParser, PageContext};
use crate::domain::model::Listing;
use scraper::{ElementRef, Html, Selector};

/// One way of finding listings in a board page.
pub type ExtractionStrategy = fn(&Html, &PageContext<'_>, &AtsConvention) -> Vec<Listing>;

/// Tried in order; the first strategy that finds anything wins, so the same
/// listing is never extracted twice.
pub const STRATEGIES: &[(&str, ExtractionStrategy)] = &[
    ("openings", extract_openings as ExtractionStrategy),
    ("job_links", extract_job_links as ExtractionStrategy),
];

/// Parser for boards that follow a known ATS markup convention.
#[derive(Debug, Clone, Copy)]
pub struct StructuredBoardParser {
    convention: &'static AtsConvention,
}

impl StructuredBoardParser {
    pub fn new(convention: &'static AtsConvention) -> Self {
        Self { convention }
    }
}

impl BoardParser for StructuredBoardParser {
    fn parse(&self, html: &str, page: &PageContext<'_>) -> Vec<Listing> {
        let document = Html::parse_document(html);

        for (name, strategy) in STRATEGIES {
            let listings = strategy(&document, page, self.convention);
            if !listings.is_empty() {
                tracing::debug!(
                    "{}: {} listings via '{}' strategy",
                    page.source,
                    listings.len(),
                    name
                );
                return listings;
            }
            tracing::debug!("{}: '{}' strategy found nothing", page.source, name);
        }

        Vec::new()
    }
}

/// Primary path: one listing per container block, taking the block's job
/// link and the first location-marked element inside it.
pub fn extract_openings(
    document: &Html,
    page: &PageContext<'_>,
    convention: &AtsConvention,
) -> Vec<Listing> {
    let (Ok(containers), Ok(anchors)) = (
        Selector::parse(convention.container_selector),
        Selector::parse("a[href]"),
    ) else {
        return Vec::new();
    };

    let mut listings = Vec::new();
    for opening in document.select(&containers) {
        if listings.len() >= page.cap {
            break;
        }

        let Some(anchor) = opening.select(&anchors).find(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| convention.is_job_link(href))
        }) else {
            continue;
        };

        // `descendants` starts with the container itself.
        let location = opening
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|el| convention.location_field.matches(el.value()))
            .map(element_text)
            .unwrap_or_default();

        if let Some(listing) = page.listing_from_anchor(anchor, location) {
            listings.push(listing);
        }
    }

    listings
}

/// Fallback path for boards without container blocks: every job link in
/// the page, paired with the next location-marked element after it in
/// document order.
pub fn extract_job_links(
    document: &Html,
    page: &PageContext<'_>,
    convention: &AtsConvention,
) -> Vec<Listing> {
    let mut listings = Vec::new();
    let mut awaiting_location: Vec<Listing> = Vec::new();

    for element in document.root_element().descendants().filter_map(ElementRef::wrap) {
        if !awaiting_location.is_empty() && convention.location_field.matches(element.value()) {
            let location = element_text(element);
            listings.extend(awaiting_location.drain(..).map(|listing| Listing {
                location: location.clone(),
                ..listing
            }));
        }

        let taken = listings.len() + awaiting_location.len();
        if taken >= page.cap {
            if awaiting_location.is_empty() {
                break;
            }
            continue;
        }

        let is_job_link = element.value().name() == "a"
            && element
                .value()
                .attr("href")
                .is_some_and(|href| convention.is_job_link(href));
        if !is_job_link {
            continue;
        }

        if let Some(listing) = page.listing_from_anchor(element, String::new()) {
            awaiting_location.push(listing);
        }
    }

    listings.extend(awaiting_location);
    listings
}
