use crate::utils::error::FetchError;
use serde::{Deserialize, Serialize};

/// One registry entry: a company name and the career page to poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub name: String,
    pub url: String,
}

impl SourceEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// A relevant job listing extracted from one fetched page.
///
/// Field order is the report order: derived `Ord` compares
/// `(source, title, location, url)` lexicographically. `unresolved` only
/// breaks ties between otherwise identical rows and never reaches the CSV.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Listing {
    pub source: String,
    pub title: String,
    pub location: String,
    pub url: String,
    /// Set when the href was relative and no origin could be determined,
    /// so `url` is kept exactly as written in the page.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unresolved: bool,
}

impl Listing {
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        location: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            location: location.into(),
            url: url.into(),
            unresolved: false,
        }
    }

    pub fn unresolved(
        source: impl Into<String>,
        title: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self {
            unresolved: true,
            ..Self::new(source, title, "", href)
        }
    }
}

/// A row of the tabular report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow<'a> {
    #[serde(rename = "Company")]
    pub company: &'a str,
    #[serde(rename = "Title")]
    pub title: &'a str,
    #[serde(rename = "Location")]
    pub location: &'a str,
    #[serde(rename = "Link")]
    pub link: &'a str,
}

impl<'a> From<&'a Listing> for ListingRow<'a> {
    fn from(listing: &'a Listing) -> Self {
        Self {
            company: &listing.source,
            title: &listing.title,
            location: &listing.location,
            link: &listing.url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceWarning {
    pub source: String,
    pub url: String,
    #[serde(serialize_with = "serialize_display")]
    pub cause: FetchError,
}

fn serialize_display<S: serde::Serializer>(
    value: &FetchError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Outcome of one harvest run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HarvestReport {
    /// Deduplicated, sorted ascending.
    pub listings: Vec<Listing>,
    pub warnings: Vec<SourceWarning>,
    pub sources_processed: usize,
}

impl HarvestReport {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn unresolved_count(&self) -> usize {
        self.listings.iter().filter(|l| l.unresolved).count()
    }
}

/// Rendered report contents, ready to be written out.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub listing_count: usize,
    pub csv_output: String,
    pub json_output: Option<String>,
}
