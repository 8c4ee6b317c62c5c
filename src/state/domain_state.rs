use std::time::{Duration, Instant};

/// Tracks politeness state for one host during a crawl
///
/// Send slots are handed out in order: each reservation is at least
/// `delay` after the previous one, so concurrent workers targeting the same
/// host are spaced out rather than bursting.
#[derive(Debug, Clone, Default)]
pub struct DomainState {
    /// Number of requests reserved for this host
    pub request_count: u32,

    /// Time of the most recently reserved request
    pub last_request_time: Option<Instant>,
}

impl DomainState {
    /// Creates a new DomainState with no requests recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next send slot and records it
    ///
    /// # Returns
    ///
    /// The instant at which the caller may send its request
    pub fn reserve_slot(&mut self, delay: Duration, now: Instant) -> Instant {
        let slot = match self.last_request_time {
            Some(last) => std::cmp::max(now, last + delay),
            None => now,
        };
        self.record_request(slot);
        slot
    }

    /// Records that a request was made at `at`
    ///
    /// An instant older than the latest reservation does not move it back.
    pub fn record_request(&mut self, at: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(self.last_request_time.map_or(at, |last| last.max(at)));
    }
}
