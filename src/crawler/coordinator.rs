//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl lifecycle that coordinates:
//! - Loading robots.txt and working out the politeness delay
//! - Crawling the seed inline so an unreachable site fails fast
//! - Running the worker pool over the frontier
//! - Enforcing the overall deadline
//! - Assembling the final report

use crate::config::CrawlConfig;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::parser::discover_links;
use crate::crawler::scheduler::{effective_delay, Politeness};
use crate::extract::{extract_page, ExtractOptions};
use crate::output::{Aggregator, CrawlReport, PageResult};
use crate::robots::{fetch_robots, ParsedRobots};
use crate::state::CrawlPhase;
use crate::url::{authority, normalize_url, page_path, LinkFilter};
use crate::{FetchError, HarvestError};
use reqwest::Client;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use url::Url;

/// What happened to one claimed page
#[derive(Debug)]
enum PageOutcome {
    /// Fetched, extracted and recorded
    Harvested,
    /// Redirected onto a page that was already recorded
    Duplicate,
    /// robots.txt forbids the URL
    Disallowed,
    /// A redirect left the site or landed on an excluded URL
    OffSite(Url),
    /// The fetch failed
    Failed(FetchError),
}

/// Everything a worker needs, shared by reference count
#[derive(Clone)]
struct CrawlContext {
    config: Arc<CrawlConfig>,
    client: Client,
    robots: Arc<ParsedRobots>,
    filter: Arc<LinkFilter>,
    frontier: Arc<Frontier>,
    politeness: Arc<Politeness>,
    results: Arc<Mutex<Aggregator>>,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<CrawlConfig>,
    client: Client,
    phase: CrawlPhase,
}

impl Coordinator {
    /// Creates a coordinator for one crawl
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(HarvestError)` - The HTTP client could not be built
    pub fn new(config: CrawlConfig) -> Result<Self, HarvestError> {
        let client = build_http_client(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
            phase: CrawlPhase::Idle,
        })
    }

    /// The current lifecycle phase
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), HarvestError> {
        if !self.phase.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        debug!("Crawl phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    fn abort(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = CrawlPhase::Aborted;
        }
    }

    /// Runs the crawl to completion or until the deadline
    ///
    /// In-flight fetches are cancelled when the deadline expires and
    /// nothing harvested so far is returned.
    pub async fn run(&mut self) -> Result<CrawlReport, HarvestError> {
        let deadline = self.config.timeout;
        let started = Instant::now();
        info!(
            "Starting crawl of {} (depth {}, max {} pages)",
            self.config.seed_url, self.config.max_depth, self.config.max_pages
        );

        let result = match tokio::time::timeout(deadline, self.execute()).await {
            Ok(result) => result,
            Err(_) => Err(HarvestError::CrawlTimeout {
                seconds: deadline.as_secs(),
            }),
        };

        match &result {
            Ok(report) => info!(
                "Crawl completed: {} pages, {} emails in {:?}",
                report.pages_visited,
                report.emails.len(),
                started.elapsed()
            ),
            Err(e) => {
                self.abort();
                warn!("Crawl of {} aborted: {}", self.config.seed_url, e);
            }
        }

        result
    }

    async fn execute(&mut self) -> Result<CrawlReport, HarvestError> {
        self.transition(CrawlPhase::Running)?;

        let robots_sent = Instant::now();
        let robots = if self.config.respect_robots {
            fetch_robots(&self.client, &self.config.seed_url).await
        } else {
            ParsedRobots::allow_all()
        };
        let delay = effective_delay(self.config.request_delay, &robots, &self.config.robots_name);
        debug!("Politeness delay is {:?}", delay);

        let politeness = Politeness::new(delay);
        if self.config.respect_robots {
            // The robots.txt request counts against the seed host's spacing
            politeness.record(&self.config.allowed_host, robots_sent);
        }

        let ctx = CrawlContext {
            config: Arc::clone(&self.config),
            client: self.client.clone(),
            robots: Arc::new(robots),
            filter: Arc::new(LinkFilter::from_config(&self.config)),
            frontier: Arc::new(Frontier::new(self.config.max_pages)),
            politeness: Arc::new(politeness),
            results: Arc::new(Mutex::new(Aggregator::new())),
        };

        self.crawl_seed(&ctx).await?;

        let mut workers = JoinSet::new();
        for id in 0..self.config.concurrency {
            workers.spawn(run_worker(ctx.clone(), id));
        }

        let mut draining = false;
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                ctx.frontier.close();
                return Err(HarvestError::CrawlFailure(format!("worker failed: {}", e)));
            }
            if !draining {
                self.transition(CrawlPhase::Draining)?;
                draining = true;
            }
        }
        if !draining {
            self.transition(CrawlPhase::Draining)?;
        }

        debug!(
            "Frontier drained: {} pages processed, {} URLs seen, {} left unclaimed",
            ctx.frontier.pages_processed(),
            ctx.frontier.visited_count(),
            ctx.frontier.pending()
        );

        let aggregator = std::mem::take(
            &mut *ctx.results.lock().unwrap_or_else(PoisonError::into_inner),
        );
        self.transition(CrawlPhase::Done)?;
        Ok(aggregator.finalize())
    }

    /// Crawls the seed before any worker starts
    async fn crawl_seed(&self, ctx: &CrawlContext) -> Result<(), HarvestError> {
        let seed = FrontierEntry::new(self.config.seed_url.clone(), 0);
        ctx.frontier.offer(seed);

        let entry = ctx
            .frontier
            .claim()
            .await
            .ok_or_else(|| HarvestError::CrawlFailure("seed was not queued".to_string()))?;

        let reason = match process_page(ctx, &entry).await {
            PageOutcome::Harvested | PageOutcome::Duplicate => {
                ctx.frontier.complete(true);
                return Ok(());
            }
            PageOutcome::Disallowed => "disallowed by robots.txt".to_string(),
            PageOutcome::OffSite(target) => format!("redirected off-site to {}", target),
            PageOutcome::Failed(e) => e.to_string(),
        };

        ctx.frontier.complete(false);
        ctx.frontier.close();
        Err(HarvestError::SeedUnreachable {
            url: entry.url.to_string(),
            reason,
        })
    }
}

/// Claims and processes pages until the frontier runs dry
async fn run_worker(ctx: CrawlContext, id: usize) {
    while let Some(entry) = ctx.frontier.claim().await {
        match process_page(&ctx, &entry).await {
            PageOutcome::Harvested => ctx.frontier.complete(true),
            PageOutcome::Duplicate => {
                debug!("Worker {}: {} duplicates a recorded page", id, entry.url);
                ctx.frontier.complete(false);
            }
            PageOutcome::Disallowed => {
                info!("Worker {}: {} disallowed by robots.txt", id, entry.url);
                ctx.frontier.complete(false);
            }
            PageOutcome::OffSite(target) => {
                info!("Worker {}: {} redirected off-site to {}", id, entry.url, target);
                ctx.frontier.complete(false);
            }
            PageOutcome::Failed(e) => {
                info!("Worker {}: skipping page: {}", id, e);
                ctx.frontier.complete(false);
            }
        }
    }
    debug!("Worker {} finished", id);
}

/// Fetches one page, records its content and queues its links
async fn process_page(ctx: &CrawlContext, entry: &FrontierEntry) -> PageOutcome {
    let config = &ctx.config;

    if !ctx.robots.is_allowed(&entry.url, &config.robots_name) {
        return PageOutcome::Disallowed;
    }

    if let Some(host) = authority(&entry.url) {
        ctx.politeness.wait_turn(&host).await;
    }

    let page = match fetch_page(&ctx.client, &entry.url).await {
        Ok(page) => page,
        Err(e) => return PageOutcome::Failed(e),
    };

    let final_url = normalize_url(page.final_url.as_str()).unwrap_or(page.final_url);
    if final_url != entry.url {
        debug!("{} redirected to {}", entry.url, final_url);
        // Seed redirects are followed wherever they land
        if entry.depth > 0 && !ctx.filter.allows_target(&final_url) {
            return PageOutcome::OffSite(final_url);
        }
        ctx.frontier.mark_visited(&final_url);
    }

    let extracted = extract_page(
        &page.body,
        &final_url,
        ExtractOptions {
            ascii_fold: config.ascii_fold,
        },
    );

    let result = PageResult {
        url: final_url.to_string(),
        path: page_path(&final_url),
        depth: entry.depth,
        title: extracted.title,
        content: extracted.content,
        emails: extracted.emails,
    };

    let recorded = ctx
        .results
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .record(result);
    if !recorded {
        return PageOutcome::Duplicate;
    }

    let links = discover_links(&page.body, &final_url, entry.depth, &ctx.filter);
    let mut queued = 0;
    for link in links {
        if ctx.frontier.offer(FrontierEntry::new(link, entry.depth + 1)) {
            queued += 1;
        }
    }

    info!(
        "Processed {} (depth {}, {} new links)",
        final_url, entry.depth, queued
    );
    PageOutcome::Harvested
}
