//! URL handling module for Site-Harvest
//!
//! This module provides seed and link normalization, host authority
//! extraction, and the follow/deny predicate applied to discovered links.

mod filter;
mod normalize;

pub use filter::{path_extension, LinkFilter};
pub use normalize::{normalize_seed, normalize_url};

use url::Url;

/// Returns the URL's authority as used for same-site checks
///
/// The host is lowercased; an explicit non-default port is kept, so
/// `http://127.0.0.1:8080/` and `http://127.0.0.1:9090/` are different sites.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_harvest::url::authority;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:3000/").unwrap();
/// assert_eq!(authority(&url), Some("localhost:3000".to_string()));
/// ```
pub fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Returns the URL path, or `/` when empty
pub fn page_path(url: &Url) -> String {
    match url.path() {
        "" => "/".to_string(),
        path => path.to_string(),
    }
}
