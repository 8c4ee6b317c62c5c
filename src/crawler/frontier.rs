//! Breadth-first crawl frontier
//!
//! The queue, the visited set and the page counters live behind one mutex
//! so that "already seen?" and "budget left?" are each answered in a single
//! critical section. Workers block in [`Frontier::claim`] while the queue is
//! empty but other pages are still in flight, since those may discover more
//! links.

use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use url::Url;

/// A URL waiting to be crawled at a given link distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Normalized URL
    pub url: Url,
    /// Link hops from the seed (seed = 0)
    pub depth: u32,
}

impl FrontierEntry {
    pub fn new(url: Url, depth: u32) -> Self {
        Self { url, depth }
    }
}

#[derive(Debug, Default)]
struct FrontierState {
    queue: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    in_flight: u32,
    processed: u32,
    closed: bool,
}

/// FIFO frontier with a visited set and a page budget
#[derive(Debug)]
pub struct Frontier {
    state: Mutex<FrontierState>,
    changed: Notify,
    max_pages: u32,
}

impl Frontier {
    /// Creates an empty frontier that will hand out at most `max_pages` pages
    pub fn new(max_pages: u32) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            changed: Notify::new(),
            max_pages,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueues `entry` unless its URL was seen before
    ///
    /// # Returns
    ///
    /// * `true` - The URL was new and is now queued
    /// * `false` - The URL was already visited, the page budget is spent or
    ///   the frontier is closed
    pub fn offer(&self, entry: FrontierEntry) -> bool {
        {
            let mut state = self.lock();
            if state.closed || state.processed >= self.max_pages {
                return false;
            }
            if !state.visited.insert(entry.url.as_str().to_string()) {
                return false;
            }
            state.queue.push_back(entry);
        }
        self.changed.notify_waiters();
        true
    }

    /// Adds `url` to the visited set without queueing it
    ///
    /// Used for redirect targets so they are not crawled a second time.
    /// Returns true if the URL had not been seen.
    pub fn mark_visited(&self, url: &Url) -> bool {
        self.lock().visited.insert(url.as_str().to_string())
    }

    /// Takes the next entry and reserves a page slot for it
    ///
    /// Waits while the queue is empty but pages are in flight, or while
    /// every remaining slot is reserved by in-flight pages that may still
    /// fail and release theirs.
    ///
    /// # Returns
    ///
    /// * `Some(entry)` - The caller owns one slot and must call [`Frontier::complete`]
    /// * `None` - The budget is spent, the frontier is exhausted or closed
    pub async fn claim(&self) -> Option<FrontierEntry> {
        loop {
            let changed = self.changed.notified();
            {
                let mut state = self.lock();
                if state.closed || state.processed >= self.max_pages {
                    return None;
                }
                if state.processed + state.in_flight < self.max_pages {
                    if let Some(entry) = state.queue.pop_front() {
                        state.in_flight += 1;
                        return Some(entry);
                    }
                }
                if state.in_flight == 0 {
                    return None;
                }
            }
            changed.await;
        }
    }

    /// Releases a slot taken by [`Frontier::claim`]
    ///
    /// A successful page is counted against the budget; a failed one gives
    /// its slot back.
    pub fn complete(&self, success: bool) {
        {
            let mut state = self.lock();
            state.in_flight = state.in_flight.saturating_sub(1);
            if success {
                state.processed += 1;
            }
        }
        self.changed.notify_waiters();
    }

    /// Stops handing out entries and wakes every waiting worker
    pub fn close(&self) {
        self.lock().closed = true;
        self.changed.notify_waiters();
    }

    /// Number of pages counted against the budget so far
    pub fn pages_processed(&self) -> u32 {
        self.lock().processed
    }

    /// Number of queued entries not yet claimed
    pub fn pending(&self) -> usize {
        self.lock().queue.len()
    }

    /// Number of distinct URLs seen
    pub fn visited_count(&self) -> usize {
        self.lock().visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn entry(path: &str, depth: u32) -> FrontierEntry {
        FrontierEntry::new(
            Url::parse("https://example.com").unwrap().join(path).unwrap(),
            depth,
        )
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let frontier = Frontier::new(10);
        frontier.offer(entry("/a", 1));
        frontier.offer(entry("/b", 1));
        frontier.offer(entry("/c", 2));

        assert_eq!(frontier.claim().await, Some(entry("/a", 1)));
        assert_eq!(frontier.claim().await, Some(entry("/b", 1)));
        assert_eq!(frontier.claim().await, Some(entry("/c", 2)));
    }

    #[test]
    fn test_offer_deduplicates() {
        let frontier = Frontier::new(10);
        assert!(frontier.offer(entry("/a", 1)));
        assert!(!frontier.offer(entry("/a", 2)));
        assert_eq!(frontier.pending(), 1);
        assert_eq!(frontier.visited_count(), 1);
    }

    #[test]
    fn test_mark_visited_blocks_later_offer() {
        let frontier = Frontier::new(10);
        let redirected = entry("/new", 1);
        assert!(frontier.mark_visited(&redirected.url));
        assert!(!frontier.offer(redirected));
        assert_eq!(frontier.pending(), 0);
    }

    #[tokio::test]
    async fn test_empty_and_idle_returns_none() {
        let frontier = Frontier::new(10);
        assert_eq!(frontier.claim().await, None);
    }

    #[tokio::test]
    async fn test_budget_limits_claims() {
        let frontier = Frontier::new(2);
        for path in ["/a", "/b", "/c", "/d"] {
            frontier.offer(entry(path, 1));
        }

        assert!(frontier.claim().await.is_some());
        frontier.complete(true);
        assert!(frontier.claim().await.is_some());
        frontier.complete(true);

        assert_eq!(frontier.claim().await, None);
        assert_eq!(frontier.pages_processed(), 2);
        assert_eq!(frontier.pending(), 2);
    }

    #[tokio::test]
    async fn test_offer_refused_once_budget_spent() {
        let frontier = Frontier::new(1);
        frontier.offer(entry("/", 0));
        frontier.claim().await;
        assert!(frontier.offer(entry("/while-in-flight", 1)));

        frontier.complete(true);
        assert!(!frontier.offer(entry("/late", 1)));
        assert_eq!(frontier.pending(), 1);
        assert_eq!(frontier.visited_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_page_releases_slot() {
        let frontier = Frontier::new(1);
        frontier.offer(entry("/broken", 1));
        frontier.offer(entry("/ok", 1));

        assert_eq!(frontier.claim().await, Some(entry("/broken", 1)));
        frontier.complete(false);
        assert_eq!(frontier.claim().await, Some(entry("/ok", 1)));
        frontier.complete(true);
        assert_eq!(frontier.claim().await, None);
    }

    #[tokio::test]
    async fn test_waiting_claim_wakes_on_offer() {
        let frontier = Arc::new(Frontier::new(10));
        frontier.offer(entry("/", 0));
        let seed = frontier.claim().await;
        assert!(seed.is_some());

        let waiter = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move { frontier.claim().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        frontier.offer(entry("/child", 1));

        let claimed = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(claimed, Some(entry("/child", 1)));
    }

    #[tokio::test]
    async fn test_waiting_claim_ends_when_last_page_completes() {
        let frontier = Arc::new(Frontier::new(10));
        frontier.offer(entry("/", 0));
        frontier.claim().await;

        let waiter = {
            let frontier = Arc::clone(&frontier);
            tokio::spawn(async move { frontier.claim().await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        frontier.complete(true);

        let claimed = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(claimed, None);
    }

    #[tokio::test]
    async fn test_close_stops_claims() {
        let frontier = Frontier::new(10);
        frontier.offer(entry("/a", 1));
        frontier.close();
        assert_eq!(frontier.claim().await, None);
        assert!(!frontier.offer(entry("/b", 1)));
    }
}
