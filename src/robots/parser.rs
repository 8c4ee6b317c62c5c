//! robots.txt rules for a single site
//!
//! Allow/Disallow matching is delegated to the robotstxt crate. The
//! `Crawl-delay` extension is not covered by that crate, so it is read here.

use robotstxt::DefaultMatcher;
use std::time::Duration;
use url::Url;

/// Longest crawl delay honored, in seconds
const MAX_CRAWL_DELAY_SECS: f64 = 60.0;

/// The robots.txt rules that apply to one crawl
#[derive(Debug, Clone, Default)]
pub struct ParsedRobots {
    /// Raw body; `None` allows everything
    body: Option<String>,
}

impl ParsedRobots {
    /// Wraps a robots.txt body
    pub fn from_content(content: &str) -> Self {
        Self {
            body: Some(content.to_string()),
        }
    }

    /// Rules that allow every URL, used when robots.txt is missing
    pub fn allow_all() -> Self {
        Self { body: None }
    }

    /// Returns true when no rules are in force
    pub fn is_allow_all(&self) -> bool {
        self.body.as_deref().map_or(true, |b| b.trim().is_empty())
    }

    /// Checks whether `url` may be fetched by `agent`
    pub fn is_allowed(&self, url: &Url, agent: &str) -> bool {
        match self.body.as_deref() {
            Some(body) if !body.trim().is_empty() => {
                let mut matcher = DefaultMatcher::default();
                matcher.one_agent_allowed_by_robots(body, agent, url.as_str())
            }
            _ => true,
        }
    }

    /// Returns the `Crawl-delay` for `agent`
    ///
    /// A group naming the agent wins over the `*` group. Values that are
    /// negative or not numbers are ignored; large values are capped.
    pub fn crawl_delay(&self, agent: &str) -> Option<Duration> {
        let body = self.body.as_deref()?;
        let agent = agent.to_lowercase();

        let mut group: Vec<String> = Vec::new();
        let mut reading_agents = false;
        let mut specific = None;
        let mut wildcard = None;

        for line in body.lines() {
            let line = line.split('#').next().unwrap_or("").trim();
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            if key == "user-agent" {
                if !reading_agents {
                    group.clear();
                }
                group.push(value.to_lowercase());
                reading_agents = true;
                continue;
            }
            reading_agents = false;

            if key != "crawl-delay" {
                continue;
            }
            let Ok(secs) = value.parse::<f64>() else {
                continue;
            };
            if !secs.is_finite() || secs < 0.0 {
                continue;
            }
            let delay = Duration::from_secs_f64(secs.min(MAX_CRAWL_DELAY_SECS));

            if group.iter().any(|ua| ua != "*" && agent.contains(ua.as_str())) {
                specific = Some(delay);
            } else if group.iter().any(|ua| ua == "*") {
                wildcard = Some(delay);
            }
        }

        specific.or(wildcard)
    }
}
