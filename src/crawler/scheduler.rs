//! Per-host politeness
//!
//! Every request to a host first reserves a send slot. Slots are handed out
//! under a mutex, each at least the effective delay after the previous
//! one, so the spacing holds no matter how many workers are running.

use crate::robots::ParsedRobots;
use crate::state::DomainState;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Spaces requests to the same host
#[derive(Debug)]
pub struct Politeness {
    delay: Duration,
    hosts: Mutex<HashMap<String, DomainState>>,
}

impl Politeness {
    /// Creates a scheduler that spaces requests `delay` apart per host
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            hosts: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DomainState>> {
        self.hosts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserves the next send slot for `host`
    ///
    /// # Returns
    ///
    /// The instant at which the caller may send
    pub fn reserve(&self, host: &str) -> Instant {
        let now = Instant::now();
        self.lock()
            .entry(host.to_string())
            .or_insert_with(DomainState::new)
            .reserve_slot(self.delay, now)
    }

    /// Records a request to `host` sent outside the scheduler at `at`
    ///
    /// Later reservations for the host are spaced from it.
    pub fn record(&self, host: &str, at: Instant) {
        self.lock()
            .entry(host.to_string())
            .or_insert_with(DomainState::new)
            .record_request(at);
    }

    /// Waits until the caller may send a request to `host`
    pub async fn wait_turn(&self, host: &str) {
        let slot = self.reserve(host);
        let wait = slot.saturating_duration_since(Instant::now());
        if !wait.is_zero() {
            tracing::trace!("Waiting {:?} before next request to {}", wait, host);
            tokio::time::sleep(wait).await;
        }
    }

    /// Number of requests reserved for `host`
    pub fn request_count(&self, host: &str) -> u32 {
        self.lock().get(host).map_or(0, |state| state.request_count)
    }
}

/// Calculates the effective delay for a site
///
/// This takes the maximum of:
/// - The configured request delay
/// - The robots.txt crawl delay for `agent` (if specified)
pub fn effective_delay(configured: Duration, robots: &ParsedRobots, agent: &str) -> Duration {
    robots
        .crawl_delay(agent)
        .map_or(configured, |robots_delay| configured.max(robots_delay))
}
