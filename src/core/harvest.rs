use crate::core::convention::{AtsConvention, SourceClassifier, SourceKind};
use crate::core::generic::GenericBoardParser;
use crate::core::matcher::KeywordMatcher;
use crate::core::parser::{BoardParser, PageContext};
use crate::core::structured::StructuredBoardParser;
use crate::core::PageFetcher;
use crate::domain::model::{HarvestReport, Listing, SourceEntry, SourceWarning};
use std::collections::BTreeSet;
use std::time::Duration;
use url::Url;

/// Everything the coordinator needs, resolved up front.
#[derive(Debug, Clone)]
pub struct HarvestSettings {
    pub sources: Vec<SourceEntry>,
    pub matcher: KeywordMatcher,
    pub classifier: SourceClassifier,
    pub max_listings_per_source: usize,
    /// Pause between consecutive sources.
    pub courtesy_delay: Duration,
}

/// Walks the registry one source at a time: fetch, pick a parser, collect.
///
/// A source whose fetch fails contributes nothing and is reported as a
/// warning; it never stops the run.
pub struct HarvestCoordinator<F: PageFetcher> {
    fetcher: F,
    settings: HarvestSettings,
}

impl<F: PageFetcher> HarvestCoordinator<F> {
    pub fn new(fetcher: F, settings: HarvestSettings) -> Self {
        Self { fetcher, settings }
    }

    pub fn classify(&self, source: &SourceEntry) -> SourceKind {
        self.settings.classifier.classify(&source.url)
    }

    pub async fn run(&self) -> HarvestReport {
        let mut aggregate: Vec<Listing> = Vec::new();
        let mut warnings = Vec::new();
        let total = self.settings.sources.len();

        for (index, source) in self.settings.sources.iter().enumerate() {
            tracing::info!("Scraping {} ...", source.name);

            match self.fetcher.fetch(&source.url).await {
                Ok(html) => {
                    let listings = self.parse_source(source, &html);
                    tracing::info!("{}: {} matching listings", source.name, listings.len());
                    aggregate.extend(listings);
                }
                Err(cause) => {
                    tracing::warn!("{}: fetch failed: {}", source.name, cause);
                    warnings.push(SourceWarning {
                        source: source.name.clone(),
                        url: source.url.clone(),
                        cause,
                    });
                }
            }

            if index + 1 < total && !self.settings.courtesy_delay.is_zero() {
                tokio::time::sleep(self.settings.courtesy_delay).await;
            }
        }

        let collected = aggregate.len();
        let listings = finalize(aggregate);
        tracing::debug!(
            "Collected {} listings, {} after removing duplicates",
            collected,
            listings.len()
        );

        HarvestReport {
            listings,
            warnings,
            sources_processed: total,
        }
    }

    /// Runs the parser selected for `source` over already-fetched markup.
    pub fn parse_source(&self, source: &SourceEntry, html: &str) -> Vec<Listing> {
        let Ok(base_url) = Url::parse(&source.url) else {
            tracing::warn!(
                "{}: source URL '{}' is not absolute, skipping",
                source.name,
                source.url
            );
            return Vec::new();
        };

        let page = PageContext {
            source: &source.name,
            base_url: &base_url,
            matcher: &self.settings.matcher,
            cap: self.settings.max_listings_per_source,
        };

        let kind = self.classify(source);
        tracing::debug!("{}: parsing as {:?} board", source.name, kind);
        match AtsConvention::for_kind(kind) {
            Some(convention) => StructuredBoardParser::new(convention).parse(html, &page),
            None => GenericBoardParser.parse(html, &page),
        }
    }
}

/// Removes structural duplicates and sorts ascending.
pub fn finalize(listings: Vec<Listing>) -> Vec<Listing> {
    listings
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::FetchError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages and records the order of requests.
    struct StubFetcher {
        pages: HashMap<String, Result<String, FetchError>>,
        requested: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(pages: Vec<(&str, Result<String, FetchError>)>) -> Self {
            Self {
                pages: pages.into_iter().map(|(u, p)| (u.to_string(), p)).collect(),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(FetchError::ConnectionFailed("no route".to_string())))
        }
    }

    const GH_ACME: &str = "https://boards.greenhouse.io/acme";
    const GH_GLOBEX: &str = "https://boards.greenhouse.io/globex";
    const INITECH: &str = "https://www.initech.example/careers";

    fn settings(sources: &[(&str, &str)], cap: usize) -> HarvestSettings {
        HarvestSettings {
            sources: sources
                .iter()
                .map(|(name, url)| SourceEntry::new(*name, *url))
                .collect(),
            matcher: KeywordMatcher::new(["security", "risk"]),
            classifier: SourceClassifier::new(["boards.greenhouse.io"]),
            max_listings_per_source: cap,
            courtesy_delay: Duration::ZERO,
        }
    }

    fn gh_page(slug: &str, titles: &[&str]) -> String {
        titles
            .iter()
            .enumerate()
            .map(|(i, t)| {
                format!(
                    r#"<div class="opening"><a href="/{}/jobs/{}">{}</a><span class="location">Remote</span></div>"#,
                    slug, i, t
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_failed_source_is_isolated_and_warned() {
        let fetcher = StubFetcher::new(vec![
            (GH_ACME, Ok(gh_page("acme", &["Security Engineer"]))),
            (GH_GLOBEX, Err(FetchError::HttpStatus(503))),
            (
                INITECH,
                Ok(r#"<a href="https://www.initech.example/jobs/9">Risk Analyst</a>"#.to_string()),
            ),
        ]);
        let coordinator = HarvestCoordinator::new(
            fetcher,
            settings(&[("Globex", GH_GLOBEX), ("Acme", GH_ACME), ("Initech", INITECH)], 300),
        );

        let report = coordinator.run().await;

        let sources: Vec<&str> = report.listings.iter().map(|l| l.source.as_str()).collect();
        assert_eq!(sources, vec!["Acme", "Initech"]);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].source, "Globex");
        assert_eq!(report.warnings[0].cause, FetchError::HttpStatus(503));
        assert_eq!(report.sources_processed, 3);
    }

    #[tokio::test]
    async fn test_sources_fetched_in_registry_order() {
        let fetcher = StubFetcher::new(vec![]);
        let coordinator = HarvestCoordinator::new(
            fetcher,
            settings(&[("Initech", INITECH), ("Acme", GH_ACME)], 300),
        );

        let report = coordinator.run().await;

        assert!(report.is_empty());
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(
            *coordinator.fetcher.requested.lock().unwrap(),
            vec![INITECH.to_string(), GH_ACME.to_string()]
        );
    }

    #[tokio::test]
    async fn test_duplicates_removed_and_output_sorted() {
        let page = gh_page("acme", &["Security Engineer", "Risk Analyst", "Security Engineer"]);
        // Same title twice but different job ids, so only identical rows collapse.
        let duplicated = format!(
            "{}{}",
            page,
            r#"<div class="opening"><a href="/acme/jobs/0">Security Engineer</a><span class="location">Remote</span></div>"#
        );
        let fetcher = StubFetcher::new(vec![(GH_ACME, Ok(duplicated))]);
        let coordinator = HarvestCoordinator::new(fetcher, settings(&[("Acme", GH_ACME)], 300));

        let report = coordinator.run().await;

        let rows: Vec<(&str, &str)> = report
            .listings
            .iter()
            .map(|l| (l.title.as_str(), l.url.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Risk Analyst", "https://boards.greenhouse.io/acme/jobs/1"),
                ("Security Engineer", "https://boards.greenhouse.io/acme/jobs/0"),
                ("Security Engineer", "https://boards.greenhouse.io/acme/jobs/2"),
            ]
        );
    }

    #[tokio::test]
    async fn test_cap_applies_per_source() {
        let titles: Vec<String> = (0..8).map(|i| format!("Security Engineer {}", i)).collect();
        let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
        let fetcher = StubFetcher::new(vec![
            (GH_ACME, Ok(gh_page("acme", &titles))),
            (GH_GLOBEX, Ok(gh_page("globex", &titles))),
        ]);
        let coordinator = HarvestCoordinator::new(
            fetcher,
            settings(&[("Acme", GH_ACME), ("Globex", GH_GLOBEX)], 5),
        );

        let report = coordinator.run().await;

        assert_eq!(report.listings.len(), 10);
    }

    #[tokio::test]
    async fn test_identical_input_gives_identical_output() {
        let build = || {
            HarvestCoordinator::new(
                StubFetcher::new(vec![(
                    GH_ACME,
                    Ok(gh_page("acme", &["Risk Lead", "Security Lead"])),
                )]),
                settings(&[("Acme", GH_ACME)], 300),
            )
        };

        let first = build().run().await;
        let second = build().run().await;

        assert_eq!(first.listings, second.listings);
    }

    #[tokio::test]
    async fn test_courtesy_delay_between_sources_only() {
        let delay = Duration::from_millis(150);
        let pages = || {
            StubFetcher::new(vec![
                (GH_ACME, Ok(gh_page("acme", &["Security Engineer"]))),
                (GH_GLOBEX, Ok(gh_page("globex", &["Risk Analyst"]))),
                (INITECH, Err(FetchError::Timeout)),
            ])
        };

        let mut three = settings(
            &[("Acme", GH_ACME), ("Globex", GH_GLOBEX), ("Initech", INITECH)],
            300,
        );
        three.courtesy_delay = delay;
        let started = std::time::Instant::now();
        let report = HarvestCoordinator::new(pages(), three).run().await;
        let elapsed = started.elapsed();

        assert_eq!(report.listings.len(), 2);
        assert!(elapsed >= delay * 2, "elapsed {:?}", elapsed);
        assert!(elapsed < delay * 3, "slept after the last source: {:?}", elapsed);

        let mut single = settings(&[("Acme", GH_ACME)], 300);
        single.courtesy_delay = delay;
        let started = std::time::Instant::now();
        HarvestCoordinator::new(pages(), single).run().await;
        assert!(started.elapsed() < delay, "single source paid the delay");
    }

    #[test]
    fn test_finalize_collapses_identical_listings() {
        let listing = Listing::new("Acme", "Security Engineer", "Remote", "https://a/1");
        let merged = finalize(vec![listing.clone(), listing.clone()]);
        assert_eq!(merged, vec![listing]);
    }

    #[test]
    fn test_parser_selection_by_source_url() {
        let coordinator = HarvestCoordinator::new(
            StubFetcher::new(vec![]),
            settings(&[], 300),
        );
        let html = r#"<div class="opening"><a href="/acme/jobs/1">Security Engineer</a></div>"#;

        // Greenhouse parser resolves against the source URL.
        let gh = coordinator.parse_source(&SourceEntry::new("Acme", GH_ACME), html);
        assert_eq!(gh[0].url, "https://boards.greenhouse.io/acme/jobs/1");
        assert!(!gh[0].unresolved);

        // Generic parser only trusts hints in the page itself.
        let generic = coordinator.parse_source(&SourceEntry::new("Initech", INITECH), html);
        assert_eq!(generic[0].url, "/acme/jobs/1");
        assert!(generic[0].unresolved);
    }
}
