//! Configuration module for Site-Harvest
//!
//! A crawl is configured from two inputs: the caller's [`CrawlRequest`]
//! (seed URL and limits) and an optional TOML [`CrawlProfile`] carrying the
//! deployment settings (politeness delay, worker count, deadline, user agent).
//! Both are merged exactly once into an immutable [`CrawlConfig`].
//!
//! # Example
//!
//! ```no_run
//! use site_harvest::config::{load_profile, CrawlConfig, CrawlRequest};
//! use std::path::Path;
//!
//! let profile = load_profile(Path::new("profile.toml")).unwrap();
//! let request = CrawlRequest::new("example.com");
//! let config = CrawlConfig::new(&request, &profile).unwrap();
//! println!("Crawling host {}", config.allowed_host);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::{compute_profile_hash, load_profile, load_profile_with_hash};
pub use types::{
    CrawlConfig, CrawlProfile, CrawlRequest, CrawlerSettings, UserAgentSettings,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES, EXCLUDED_EXTENSIONS, EXCLUDED_PATTERNS, MAX_CONCURRENCY,
    MAX_DEPTH_LIMIT, MAX_PAGES_LIMIT,
};
pub use validation::{validate_profile, validate_request};
