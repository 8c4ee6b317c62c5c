/// Crawl phase definitions for tracking a run's lifecycle
///
/// A run moves `Idle -> Running -> Draining -> Done`, or ends in `Aborted`
/// from any non-terminal phase.
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Configured, nothing fetched yet
    Idle,

    /// Workers are dequeuing and processing pages
    Running,

    /// No new pages are dispatched; in-flight fetches are finishing
    Draining,

    /// All work finished and the report is assembled
    Done,

    /// Deadline expired or the seed could not be crawled
    Aborted,
}

impl CrawlPhase {
    /// Returns true if no further transitions are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Aborted)
    }

    /// Returns true if the transition `self -> next` is legal
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Done)
                | (Self::Idle, Self::Aborted)
                | (Self::Running, Self::Aborted)
                | (Self::Draining, Self::Aborted)
        )
    }

    /// Returns the lowercase phase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
            Self::Aborted => "aborted",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        assert!(CrawlPhase::Idle.can_transition_to(CrawlPhase::Running));
        assert!(CrawlPhase::Running.can_transition_to(CrawlPhase::Draining));
        assert!(CrawlPhase::Draining.can_transition_to(CrawlPhase::Done));
    }

    #[test]
    fn test_abort_from_active_phases() {
        assert!(CrawlPhase::Idle.can_transition_to(CrawlPhase::Aborted));
        assert!(CrawlPhase::Running.can_transition_to(CrawlPhase::Aborted));
        assert!(CrawlPhase::Draining.can_transition_to(CrawlPhase::Aborted));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!CrawlPhase::Idle.can_transition_to(CrawlPhase::Done));
        assert!(!CrawlPhase::Running.can_transition_to(CrawlPhase::Idle));
        assert!(!CrawlPhase::Done.can_transition_to(CrawlPhase::Running));
        assert!(!CrawlPhase::Aborted.can_transition_to(CrawlPhase::Running));
        assert!(!CrawlPhase::Done.can_transition_to(CrawlPhase::Aborted));
    }

    #[test]
    fn test_is_terminal() {
        assert!(!CrawlPhase::Idle.is_terminal());
        assert!(!CrawlPhase::Running.is_terminal());
        assert!(!CrawlPhase::Draining.is_terminal());
        assert!(CrawlPhase::Done.is_terminal());
        assert!(CrawlPhase::Aborted.is_terminal());
    }

    #[test]
    fn test_display() {
        assert_eq!(CrawlPhase::Draining.to_string(), "draining");
        assert_eq!(format!("{}", CrawlPhase::Aborted), "aborted");
    }
}
