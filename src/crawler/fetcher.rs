//! HTTP fetcher implementation
//!
//! This module builds the shared HTTP client and performs page fetches.
//! Redirects are followed by reqwest; the final URL is reported back so
//! relative links resolve against where the page actually lives.

use crate::config::CrawlConfig;
use crate::FetchError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Accept header sent with every request
const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Maximum redirect hops before a fetch fails
const MAX_REDIRECTS: usize = 10;

/// A successfully fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: Url,
    /// HTTP status code
    pub status: u16,
    /// Decoded body
    pub body: String,
}

/// Builds an HTTP client with the run's identity and timeouts
///
/// # Arguments
///
/// * `config` - The run configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    if let Ok(language) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, language);
    }

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(config.fetch_timeout)
        .connect_timeout(Duration::from_secs(10).min(config.fetch_timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page
///
/// | Condition | Result |
/// |-----------|--------|
/// | Connect, timeout or redirect failure | `FetchError::Network` |
/// | Non-2xx status | `FetchError::Status` |
/// | Content-Type present and not HTML | `FetchError::ContentMismatch` |
/// | Body cannot be decoded | `FetchError::Decode` |
///
/// A missing Content-Type header is treated as HTML.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: classify(&e),
        })?;

    let status = response.status();
    let final_url = response.url().clone();

    if !status.is_success() {
        return Err(FetchError::Status {
            url: final_url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();

    if !is_html(&content_type) {
        return Err(FetchError::ContentMismatch {
            url: final_url.to_string(),
            content_type,
        });
    }

    let body = response.text().await.map_err(|e| FetchError::Decode {
        url: final_url.to_string(),
        message: e.to_string(),
    })?;

    Ok(FetchedPage {
        final_url,
        status: status.as_u16(),
        body,
    })
}

fn is_html(content_type: &str) -> bool {
    content_type.is_empty()
        || content_type.contains("text/html")
        || content_type.contains("application/xhtml+xml")
}

fn classify(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else {
        error.to_string()
    }
}
