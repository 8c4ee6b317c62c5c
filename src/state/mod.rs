//! State management module
//!
//! This module contains the crawl phase machine and per-host politeness
//! state used by the scheduler.

mod crawl_phase;
mod domain_state;

pub use crawl_phase::CrawlPhase;
pub use domain_state::DomainState;
