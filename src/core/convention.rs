//! Source classification and the markup conventions of known ATS boards.

use scraper::node::Element;
use url::Url;

/// Which parser family a source is handled by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Greenhouse-hosted board (`div.opening` blocks, `/jobs/<id>` links).
    Greenhouse,
    Generic,
}

/// Decides [`SourceKind`] from a source URL's host.
#[derive(Debug, Clone)]
pub struct SourceClassifier {
    ats_domains: Vec<String>,
}

impl SourceClassifier {
    pub fn new<I, S>(ats_domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ats_domains: ats_domains
                .into_iter()
                .map(|d| d.as_ref().trim().to_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// A host matches a domain when it ends with it, so vendor hosts such as
    /// `job-boards.greenhouse.io` count as `boards.greenhouse.io`. Only the
    /// host is inspected; URLs without a host fall back to substring
    /// containment.
    pub fn classify(&self, url: &str) -> SourceKind {
        let host = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_lowercase));

        let is_ats = self.ats_domains.iter().any(|domain| match &host {
            Some(host) => host.ends_with(domain.as_str()),
            None => url.to_lowercase().contains(domain.as_str()),
        });

        if is_ats {
            SourceKind::Greenhouse
        } else {
            SourceKind::Generic
        }
    }
}

/// "Some attribute of this element contains `needle`", case-insensitively.
/// The tag name plays no part in the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeContains {
    pub attributes: &'static [&'static str],
    pub needle: &'static str,
}

impl AttributeContains {
    pub fn matches(&self, element: &Element) -> bool {
        element.attrs().any(|(name, value)| {
            self.attributes
                .iter()
                .any(|attr| name.eq_ignore_ascii_case(attr))
                && value.to_lowercase().contains(self.needle)
        })
    }
}

/// Where listings live in a board's markup.
#[derive(Debug, Clone, Copy)]
pub struct AtsConvention {
    /// CSS selector for one listing block.
    pub container_selector: &'static str,
    /// Case-insensitive href fragment identifying a job-detail link.
    pub job_link_marker: &'static str,
    pub location_field: AttributeContains,
}

const CLASS_LIKE: &[&str] = &["class"];

const GREENHOUSE: AtsConvention = AtsConvention {
    container_selector: "div.opening",
    job_link_marker: "/job",
    location_field: AttributeContains {
        attributes: CLASS_LIKE,
        needle: "location",
    },
};

impl AtsConvention {
    /// `None` for [`SourceKind::Generic`], which has no shared convention.
    pub fn for_kind(kind: SourceKind) -> Option<&'static AtsConvention> {
        match kind {
            SourceKind::Greenhouse => Some(&GREENHOUSE),
            SourceKind::Generic => None,
        }
    }

    pub fn is_job_link(&self, href: &str) -> bool {
        href.to_lowercase().contains(self.job_link_marker)
    }
}
