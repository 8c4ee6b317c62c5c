use crate::config::validation::{validate_profile, validate_request};
use crate::url::{authority, normalize_seed};
use crate::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Default crawl depth when the caller gives none
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Default page budget when the caller gives none
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// Upper bound accepted for `max_depth`
pub const MAX_DEPTH_LIMIT: u32 = 5;

/// Upper bound accepted for `max_pages`
pub const MAX_PAGES_LIMIT: u32 = 50;

/// Upper bound on the per-host worker pool
pub const MAX_CONCURRENCY: usize = 16;

/// File extensions that are never followed
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "zip", "rar", "exe", "dmg", "jpg", "jpeg",
    "png", "gif", "css", "js", "ico", "svg", "mp4", "mp3",
];

/// URL patterns that are never followed
pub const EXCLUDED_PATTERNS: &[&str] = &[
    r"(?i)\.(pdf|doc|docx|xls|xlsx|ppt|pptx|zip|rar|exe|dmg)$",
    r"#",
    r"/search\?",
    r"/tag/",
    r"/category/",
];

/// The caller's crawl input, shared by the CLI and the HTTP service
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlRequest {
    /// Seed URL; the scheme may be omitted
    pub url: String,

    /// Maximum number of link hops from the seed (1-5)
    #[serde(default = "default_max_depth", alias = "maxDepth")]
    pub max_depth: u32,

    /// Maximum number of pages to process (1-50)
    #[serde(default = "default_max_pages", alias = "maxPages")]
    pub max_pages: u32,
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

impl CrawlRequest {
    /// Creates a request with the default depth and page limits
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Sets the depth limit
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the page budget
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Deployment profile loaded from TOML
///
/// Every key is optional; an empty file yields [`CrawlProfile::default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlProfile {
    #[serde(default)]
    pub crawler: CrawlerSettings,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentSettings,
}

/// Crawler behavior settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerSettings {
    /// Minimum time between requests to the same host (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Number of concurrent workers
    pub concurrency: usize,

    /// Wall-clock budget for a whole crawl (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Timeout for a single HTTP request (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Whether robots.txt is fetched and obeyed
    #[serde(rename = "respect-robots")]
    pub respect_robots: bool,

    /// Whether extracted text is folded to ASCII
    #[serde(rename = "ascii-fold")]
    pub ascii_fold: bool,
}

impl Default for CrawlerSettings {
    fn default() -> Self {
        Self {
            request_delay_ms: 1000,
            concurrency: 1,
            timeout_secs: 300,
            fetch_timeout_secs: 30,
            respect_robots: true,
            ascii_fold: true,
        }
    }
}

/// User agent and request header settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentSettings {
    /// Full User-Agent header value
    pub value: String,

    /// Accept-Language header value
    #[serde(rename = "accept-language")]
    pub accept_language: String,

    /// Product token matched against robots.txt `User-agent` groups
    #[serde(rename = "robots-name")]
    pub robots_name: String,
}

impl Default for UserAgentSettings {
    fn default() -> Self {
        Self {
            value: format!(
                "Mozilla/5.0 (compatible; site-harvest/{})",
                env!("CARGO_PKG_VERSION")
            ),
            accept_language: "en".to_string(),
            robots_name: "site-harvest".to_string(),
        }
    }
}

/// Immutable per-run crawl configuration
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Normalized seed URL
    pub seed_url: Url,

    /// Authority (`host` or `host:port`) that every followed link must match
    pub allowed_host: String,

    pub max_depth: u32,
    pub max_pages: u32,

    /// Politeness interval between requests to the same host
    pub request_delay: Duration,

    /// Lowercase extensions that are never followed
    pub excluded_extensions: HashSet<String>,

    /// Compiled deny patterns matched against absolute URLs
    pub excluded_patterns: Vec<Regex>,

    /// Worker pool size
    pub concurrency: usize,

    /// Overall crawl deadline
    pub timeout: Duration,

    /// Per-request timeout
    pub fetch_timeout: Duration,

    pub respect_robots: bool,
    pub ascii_fold: bool,
    pub user_agent: String,
    pub accept_language: String,
    pub robots_name: String,
}

impl CrawlConfig {
    /// Builds the run configuration from a request and a profile
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlConfig)` - Validated configuration
    /// * `Err(ConfigError)` - The seed is not a usable URL or a limit is out of range
    pub fn new(request: &CrawlRequest, profile: &CrawlProfile) -> Result<Self, ConfigError> {
        validate_request(request)?;
        validate_profile(profile)?;

        let seed_url = normalize_seed(&request.url)
            .map_err(|e| ConfigError::InvalidUrl(format!("'{}': {}", request.url, e)))?;
        let allowed_host = authority(&seed_url).ok_or_else(|| {
            ConfigError::InvalidUrl(format!("'{}' has no host", request.url))
        })?;

        let excluded_patterns = EXCLUDED_PATTERNS
            .iter()
            .map(|p| Regex::new(p).map_err(|e| ConfigError::InvalidPattern(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        let settings = &profile.crawler;

        Ok(Self {
            seed_url,
            allowed_host,
            max_depth: request.max_depth,
            max_pages: request.max_pages,
            request_delay: Duration::from_millis(settings.request_delay_ms),
            excluded_extensions: EXCLUDED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_patterns,
            concurrency: settings.concurrency,
            timeout: Duration::from_secs(settings.timeout_secs),
            fetch_timeout: Duration::from_secs(settings.fetch_timeout_secs),
            respect_robots: settings.respect_robots,
            ascii_fold: settings.ascii_fold,
            user_agent: profile.user_agent.value.clone(),
            accept_language: profile.user_agent.accept_language.clone(),
            robots_name: profile.user_agent.robots_name.clone(),
        })
    }

    /// Overrides the overall deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the politeness interval
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }
}
