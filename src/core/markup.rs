use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Text content of an element with whitespace runs collapsed to one space.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_web_url(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Joins `href` onto `base`; `None` unless the result is http(s).
pub fn resolve_href(base: &Url, href: &str) -> Option<Url> {
    base.join(href.trim()).ok().filter(is_web_url)
}

/// Absolute http(s) URL, when `href` already is one.
pub fn absolute_href(href: &str) -> Option<Url> {
    Url::parse(href.trim()).ok().filter(is_web_url)
}

/// Origin hint declared by the page itself: `<base href>` first, then
/// `<link rel="canonical">`. Hints that are not absolute http(s) URLs are
/// ignored.
pub fn declared_base_url(document: &Html) -> Option<Url> {
    first_absolute_href(document, "base[href]")
        .or_else(|| first_absolute_href(document, r#"link[rel~="canonical"][href]"#))
}

fn first_absolute_href(document: &Html, selector: &str) -> Option<Url> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .find_map(absolute_href)
}
