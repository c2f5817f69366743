use crate::core::markup::{absolute_href, declared_base_url, element_text, resolve_href};
use crate::core::parser::{BoardParser, PageContext};
use crate::domain::model::Listing;
use scraper::{Html, Selector};
use url::Url;

/// Href fragments that make a link look like a job posting.
pub const JOB_PATH_TOKENS: &[&str] = &["job", "career", "position", "opportunit"];

/// Heuristic parser for career pages with no known markup convention.
///
/// Any anchor whose text is relevant and whose href looks job-related is
/// taken. Locations are never recorded. Relative hrefs are resolved against
/// the page's own `<base>` or canonical-link hint; when the page declares
/// neither, the listing keeps the href as written and is flagged
/// `unresolved`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericBoardParser;

impl GenericBoardParser {
    pub fn looks_like_job_link(href: &str) -> bool {
        let href = href.to_lowercase();
        JOB_PATH_TOKENS.iter().any(|token| href.contains(token))
    }

    fn listing_for(
        page: &PageContext<'_>,
        origin: Option<&Url>,
        title: String,
        href: &str,
    ) -> Option<Listing> {
        if let Some(url) = absolute_href(href) {
            return Some(Listing::new(page.source, title, "", url));
        }
        if Url::parse(href).is_ok() {
            // mailto:, javascript: and other non-web schemes
            return None;
        }

        match origin.and_then(|base| resolve_href(base, href)) {
            Some(url) => Some(Listing::new(page.source, title, "", url)),
            None => Some(Listing::unresolved(page.source, title, href)),
        }
    }
}

impl BoardParser for GenericBoardParser {
    fn parse(&self, html: &str, page: &PageContext<'_>) -> Vec<Listing> {
        let document = Html::parse_document(html);
        let Ok(anchors) = Selector::parse("a[href]") else {
            return Vec::new();
        };
        let origin = declared_base_url(&document);

        let mut listings = Vec::new();
        for anchor in document.select(&anchors) {
            if listings.len() >= page.cap {
                break;
            }

            let title = element_text(anchor);
            let href = anchor.value().attr("href").unwrap_or_default().trim();
            if title.is_empty() || href.is_empty() {
                continue;
            }
            if !page.matcher.is_match(&title) || !Self::looks_like_job_link(href) {
                continue;
            }

            if let Some(listing) = Self::listing_for(page, origin.as_ref(), title, href) {
                listings.push(listing);
            }
        }

        let unresolved = listings.iter().filter(|l| l.unresolved).count();
        if unresolved > 0 {
            tracing::debug!(
                "{}: {} listings kept with unresolved relative links",
                page.source,
                unresolved
            );
        }

        listings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matcher::KeywordMatcher;

    fn parse(html: &str, cap: usize) -> Vec<Listing> {
        let base_url = Url::parse("https://www.example.edu/jobs").unwrap();
        let matcher = KeywordMatcher::new(["security", "privacy", "compliance"]);
        let page = PageContext {
            source: "Example U",
            base_url: &base_url,
            matcher: &matcher,
            cap,
        };
        GenericBoardParser.parse(html, &page)
    }

    #[test]
    fn test_requires_keyword_and_job_path_token() {
        let html = r#"<body>
            <a href="https://www.example.edu/job/1">Security Analyst</a>
            <a href="https://www.example.edu/job/2">Accountant</a>
            <a href="https://www.example.edu/blog/privacy">Privacy at Example</a>
            <a href="https://www.example.edu/Opportunities/3">Compliance Officer</a>
            <a href="https://www.example.edu/Positions/4">  Privacy   Counsel </a>
        </body>"#;

        let listings = parse(html, 300);

        let titles: Vec<&str> = listings.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["Security Analyst", "Compliance Officer", "Privacy Counsel"]);
        assert!(listings.iter().all(|l| l.location.is_empty() && !l.unresolved));
    }

    #[test]
    fn test_relative_href_resolved_from_base_tag() {
        let html = r#"<html><head><base href="https://jobs.example.org/"></head>
            <body><a href="careers/123">Security Engineer</a></body></html>"#;

        let listings = parse(html, 300);

        assert_eq!(listings[0].url, "https://jobs.example.org/careers/123");
        assert!(!listings[0].unresolved);
    }

    #[test]
    fn test_relative_href_resolved_from_canonical_link() {
        let html = r#"<html><head><link rel="canonical" href="https://www.example.org/about/careers/"></head>
            <body><a href="/careers/jobs/55">Privacy Analyst</a></body></html>"#;

        let listings = parse(html, 300);

        assert_eq!(listings[0].url, "https://www.example.org/careers/jobs/55");
    }

    #[test]
    fn test_relative_href_without_hint_is_kept_unresolved() {
        let html = r#"<a href="/jobs/security-engineer">Security Engineer</a>"#;

        let listings = parse(html, 300);

        assert_eq!(
            listings,
            vec![Listing::unresolved("Example U", "Security Engineer", "/jobs/security-engineer")]
        );
    }

    #[test]
    fn test_non_web_schemes_are_dropped() {
        let html = r#"<a href="mailto:jobs@example.edu">Security jobs inbox</a>
            <a href="javascript:openJob(1)">Security Engineer</a>"#;

        assert!(parse(html, 300).is_empty());
    }

    #[test]
    fn test_cap() {
        let html: String = (0..20)
            .map(|i| format!(r#"<a href="https://x.example/jobs/{}">Security Role {}</a>"#, i, i))
            .collect();

        assert_eq!(parse(&html, 5).len(), 5);
    }
}
