//! Output module for assembling and writing crawl reports
//!
//! This module handles:
//! - Collecting per-page results in completion order
//! - Building the final ordered, deduplicated report
//! - Writing the report as JSON

mod aggregator;
mod report;
mod writer;

pub use aggregator::Aggregator;
pub use report::{CrawlReport, PageResult};
pub use writer::{render_report, write_report};
