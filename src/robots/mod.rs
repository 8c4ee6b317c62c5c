//! Robots.txt handling module
//!
//! One robots.txt is fetched per crawl, from the seed's origin. Anything
//! other than a successful text response is treated as allow-all.

mod parser;

pub use parser::ParsedRobots;

use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Fetches and parses `/robots.txt` for the origin of `seed`
///
/// # Returns
///
/// The parsed rules, or [`ParsedRobots::allow_all`] when the file is
/// missing, unreadable or the request fails
pub async fn fetch_robots(client: &Client, seed: &Url) -> ParsedRobots {
    let robots_url = match seed.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            debug!("Cannot build robots.txt URL for {}: {}", seed, e);
            return ParsedRobots::allow_all();
        }
    };

    let response = match client.get(robots_url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!("robots.txt fetch failed for {}: {}", robots_url, e);
            return ParsedRobots::allow_all();
        }
    };

    if !response.status().is_success() {
        debug!(
            "robots.txt at {} returned {}; allowing all",
            robots_url,
            response.status()
        );
        return ParsedRobots::allow_all();
    }

    match response.text().await {
        Ok(body) => {
            info!("Loaded robots.txt from {}", robots_url);
            ParsedRobots::from_content(&body)
        }
        Err(e) => {
            debug!("robots.txt body unreadable at {}: {}", robots_url, e);
            ParsedRobots::allow_all()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_robots_reads_rules() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"))
            .mount(&server)
            .await;

        let seed = Url::parse(&format!("{}/start", server.uri())).unwrap();
        let robots = fetch_robots(&Client::new(), &seed).await;

        assert!(!robots.is_allowed(&seed.join("/private/x").unwrap(), "site-harvest"));
        assert!(robots.is_allowed(&seed, "site-harvest"));
    }

    #[tokio::test]
    async fn test_missing_robots_allows_all() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let seed = Url::parse(&server.uri()).unwrap();
        let robots = fetch_robots(&Client::new(), &seed).await;
        assert!(robots.is_allow_all());
    }

    #[tokio::test]
    async fn test_unreachable_host_allows_all() {
        let seed = Url::parse("http://127.0.0.1:1/").unwrap();
        let robots = fetch_robots(&Client::new(), &seed).await;
        assert!(robots.is_allow_all());
    }
}
