use crate::UrlError;
use url::Url;

/// Tracking query parameters removed during normalization
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "mc_eid",
];

/// Turns caller input into an absolute seed URL
///
/// A missing scheme defaults to `https://`. Only HTTP and HTTPS are accepted.
///
/// # Examples
///
/// ```
/// use site_harvest::url::normalize_seed;
///
/// let url = normalize_seed("example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// ```
pub fn normalize_seed(input: &str) -> Result<Url, UrlError> {
    let input = input.trim();
    let with_scheme = if input.contains("://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };
    normalize_url(&with_scheme)
}

/// Normalizes a URL into the key used by the visited set
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject schemes other than HTTP and HTTPS
/// 3. Require a host (the parser lowercases it and resolves dot segments)
/// 4. Remove the fragment
/// 5. Remove tracking query parameters
/// 6. Sort remaining query parameters by key
/// 7. Remove an empty query string
///
/// # Examples
///
/// ```
/// use site_harvest::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.COM/page?b=2&a=1#top").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page?a=1&b=2");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    if url.query().is_some() {
        let params = filter_and_sort_query_params(&url);
        if params.is_empty() {
            url.set_query(None);
        } else {
            url.query_pairs_mut().clear().extend_pairs(params);
        }
    }

    Ok(url)
}

/// Filters out tracking parameters and sorts remaining query parameters
fn filter_and_sort_query_params(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    // Stable sort keeps repeated keys in their original order
    params.sort_by(|a, b| a.0.cmp(&b.0));
    params
}

fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || key.starts_with("utm_")
}
