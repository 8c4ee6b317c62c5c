//! Link discovery
//!
//! Collects the followable links of a page, in document order, resolved
//! against the page's final URL and normalized for the visited set.

use crate::url::{normalize_url, LinkFilter};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use url::Url;

static LINK_SELECTOR: Lazy<Option<Selector>> =
    Lazy::new(|| Selector::parse("a[href], area[href]").ok());

/// Extracts the links a crawl may follow from a page
///
/// # Link Rules
///
/// **Include:** `<a href>` and `<area href>` that resolve to http(s) and
/// pass `filter` at `parent_depth + 1`.
///
/// **Exclude:**
/// - elements with a `download` attribute
/// - `javascript:`, `mailto:`, `tel:` and `data:` hrefs
/// - fragment-only hrefs
///
/// Duplicates within the page are kept; the frontier deduplicates.
///
/// # Example
///
/// ```
/// use site_harvest::config::{CrawlConfig, CrawlProfile, CrawlRequest};
/// use site_harvest::crawler::discover_links;
/// use site_harvest::url::LinkFilter;
///
/// let config = CrawlConfig::new(&CrawlRequest::new("https://example.com"), &CrawlProfile::default()).unwrap();
/// let filter = LinkFilter::from_config(&config);
/// let html = r#"<a href="/about">About</a><a href="https://other.org/">Other</a>"#;
/// let links = discover_links(html, &config.seed_url, 0, &filter);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://example.com/about");
/// ```
pub fn discover_links(html: &str, base_url: &Url, parent_depth: u32, filter: &LinkFilter) -> Vec<Url> {
    let Some(selector) = LINK_SELECTOR.as_ref() else {
        return Vec::new();
    };
    let document = Html::parse_document(html);
    let child_depth = parent_depth + 1;

    document
        .select(selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .filter(|url| filter.allows(url, child_depth))
        .filter_map(|url| normalize_url(url.as_str()).ok())
        .collect()
}

/// Resolves an href to an absolute http(s) URL
///
/// Returns None for special schemes, fragment-only links and anything
/// that does not resolve.
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if ["javascript:", "mailto:", "tel:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    matches!(absolute.scheme(), "http" | "https").then_some(absolute)
}
