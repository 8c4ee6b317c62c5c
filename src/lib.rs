//! Site-Harvest: a single-site content and contact crawler
//!
//! This crate crawls one website breadth-first from a seed URL, staying on the
//! seed's host, and extracts cleaned page text and contact email addresses.
//! The crawl result is a [`CrawlReport`] that serializes to the JSON shape
//! served by both the CLI and the HTTP service.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod robots;
pub mod server;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Site-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Seed URL {url} could not be crawled: {reason}")]
    SeedUnreachable { url: String, reason: String },

    #[error("Crawl timeout after {seconds} seconds")]
    CrawlTimeout { seconds: u64 },

    #[error("Crawl failed: {0}")]
    CrawlFailure(String),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarvestError {
    /// Returns true for faults where the crawl itself ran and reported failure,
    /// as opposed to the call being unusable (timeout, internal fault, bad input)
    pub fn is_crawl_reported(&self) -> bool {
        matches!(self, Self::SeedUnreachable { .. })
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read profile file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid exclusion pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Per-page fetch failures; these never abort a crawl
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Expected HTML from {url}, got {content_type}")]
    ContentMismatch { url: String, content_type: String },

    #[error("Failed to decode body of {url}: {message}")]
    Decode { url: String, message: String },
}

/// Result type alias for Site-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{CrawlConfig, CrawlProfile, CrawlRequest};
pub use crawler::{crawl, run_crawl};
pub use output::{CrawlReport, PageResult};
pub use state::CrawlPhase;
