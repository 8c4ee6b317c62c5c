//! Crawl result types
//!
//! [`CrawlReport`] is the one JSON shape returned by the library, the CLI
//! and the HTTP service.

use crate::HarvestError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What was harvested from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// Final URL after redirects, normalized
    pub url: String,

    /// URL path, `/` for the site root
    pub path: String,

    /// Link hops from the seed
    pub depth: u32,

    pub title: Option<String>,

    /// Cleaned page text
    pub content: String,

    pub emails: BTreeSet<String>,
}

/// The outcome of a crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    pub success: bool,

    /// One `"Page {path}\n\n{content}"` block per page, ordered by depth then path
    pub content: Vec<String>,

    /// Sorted, deduplicated emails across every page
    pub emails: Vec<String>,

    /// Always empty; kept for the response shape
    pub links: Vec<String>,

    pub pages_visited: u32,

    /// Failure description; `null` on success
    pub error: Option<String>,
}

impl CrawlReport {
    /// A report for a crawl that produced nothing
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            content: Vec::new(),
            emails: Vec::new(),
            links: Vec::new(),
            pages_visited: 0,
            error: Some(message.into()),
        }
    }

    /// A failure report describing `error`
    pub fn from_error(error: &HarvestError) -> Self {
        Self::failure(error.to_string())
    }
}
