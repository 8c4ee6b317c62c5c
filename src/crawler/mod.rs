//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - Link discovery and filtering
//! - The breadth-first frontier and per-host politeness
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod scheduler;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use frontier::{Frontier, FrontierEntry};
pub use parser::discover_links;
pub use scheduler::{effective_delay, Politeness};

use crate::config::CrawlConfig;
use crate::output::CrawlReport;
use crate::HarvestError;

/// Runs a complete crawl operation
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl finished; the report has `success = true`
/// * `Err(HarvestError)` - The seed could not be crawled, the deadline
///   expired or the client could not be built
pub async fn run_crawl(config: CrawlConfig) -> Result<CrawlReport, HarvestError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}

/// Runs a crawl and folds any failure into the report
///
/// This is the main entry point for callers that only want the JSON shape.
pub async fn crawl(config: CrawlConfig) -> CrawlReport {
    match run_crawl(config).await {
        Ok(report) => report,
        Err(e) => CrawlReport::from_error(&e),
    }
}
