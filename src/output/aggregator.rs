use crate::output::{CrawlReport, PageResult};
use std::collections::{BTreeSet, HashSet};

/// Collects page results as workers finish them
///
/// Pages arrive in completion order; [`Aggregator::finalize`] restores a
/// deterministic order by `(depth, path)`.
#[derive(Debug, Default)]
pub struct Aggregator {
    pages: Vec<PageResult>,
    seen: HashSet<String>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page unless one with the same final URL was already recorded
    ///
    /// Returns true if the page was added.
    pub fn record(&mut self, page: PageResult) -> bool {
        if !self.seen.insert(page.url.clone()) {
            return false;
        }
        self.pages.push(page);
        true
    }

    /// Number of distinct pages recorded
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Builds the successful report
    pub fn finalize(mut self) -> CrawlReport {
        self.pages
            .sort_by(|a, b| (a.depth, &a.path, &a.url).cmp(&(b.depth, &b.path, &b.url)));

        let emails: BTreeSet<String> = self
            .pages
            .iter()
            .flat_map(|page| page.emails.iter().cloned())
            .collect();

        let content = self
            .pages
            .iter()
            .filter(|page| !page.content.trim().is_empty())
            .map(|page| format!("Page {}\n\n{}", page.path, page.content))
            .collect();

        CrawlReport {
            success: true,
            content,
            emails: emails.into_iter().collect(),
            links: Vec::new(),
            pages_visited: self.pages.len() as u32,
            error: None,
        }
    }
}
