use crate::config::CrawlConfig;
use crate::url::authority;
use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// Decides whether a discovered link may be followed
///
/// A link is followable only if every check passes:
/// - its authority equals the crawl's allowed host (no subdomains)
/// - its path extension is not excluded
/// - no excluded pattern matches the absolute URL
/// - the depth it would be crawled at does not exceed `max_depth`
#[derive(Debug, Clone)]
pub struct LinkFilter {
    allowed_host: String,
    max_depth: u32,
    excluded_extensions: HashSet<String>,
    excluded_patterns: Vec<Regex>,
}

impl LinkFilter {
    /// Builds the filter from the run configuration
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            allowed_host: config.allowed_host.clone(),
            max_depth: config.max_depth,
            excluded_extensions: config.excluded_extensions.clone(),
            excluded_patterns: config.excluded_patterns.clone(),
        }
    }

    /// Returns true if `url` may be crawled at `depth`
    pub fn allows(&self, url: &Url, depth: u32) -> bool {
        depth <= self.max_depth && self.allows_target(url)
    }

    /// Returns true if `url` is on the crawled site and not excluded
    ///
    /// Same as [`LinkFilter::allows`] without the depth bound; used for
    /// redirect targets, whose depth is that of the link that led there.
    pub fn allows_target(&self, url: &Url) -> bool {
        self.is_same_host(url)
            && !self.has_excluded_extension(url)
            && !self.matches_excluded_pattern(url)
    }

    fn is_same_host(&self, url: &Url) -> bool {
        authority(url).as_deref() == Some(self.allowed_host.as_str())
    }

    fn has_excluded_extension(&self, url: &Url) -> bool {
        path_extension(url).map_or(false, |ext| self.excluded_extensions.contains(&ext))
    }

    fn matches_excluded_pattern(&self, url: &Url) -> bool {
        self.excluded_patterns
            .iter()
            .any(|pattern| pattern.is_match(url.as_str()))
    }
}

/// Returns the lowercase extension of the URL's last path segment
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_harvest::url::path_extension;
///
/// let url = Url::parse("https://example.com/files/Report.PDF").unwrap();
/// assert_eq!(path_extension(&url), Some("pdf".to_string()));
///
/// let url = Url::parse("https://example.com/about").unwrap();
/// assert_eq!(path_extension(&url), None);
/// ```
pub fn path_extension(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.last()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}
