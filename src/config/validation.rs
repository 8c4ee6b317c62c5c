use crate::config::types::{
    CrawlProfile, CrawlRequest, CrawlerSettings, UserAgentSettings, MAX_CONCURRENCY,
    MAX_DEPTH_LIMIT, MAX_PAGES_LIMIT,
};
use crate::ConfigError;

/// Validates the caller's crawl request
pub fn validate_request(request: &CrawlRequest) -> Result<(), ConfigError> {
    if request.url.trim().is_empty() {
        return Err(ConfigError::InvalidUrl("seed URL cannot be empty".to_string()));
    }

    if request.max_depth < 1 || request.max_depth > MAX_DEPTH_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_depth must be between 1 and {}, got {}",
            MAX_DEPTH_LIMIT, request.max_depth
        )));
    }

    if request.max_pages < 1 || request.max_pages > MAX_PAGES_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_pages must be between 1 and {}, got {}",
            MAX_PAGES_LIMIT, request.max_pages
        )));
    }

    Ok(())
}

/// Validates the entire profile
pub fn validate_profile(profile: &CrawlProfile) -> Result<(), ConfigError> {
    validate_crawler_settings(&profile.crawler)?;
    validate_user_agent_settings(&profile.user_agent)?;
    Ok(())
}

fn validate_crawler_settings(settings: &CrawlerSettings) -> Result<(), ConfigError> {
    if settings.concurrency < 1 || settings.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, settings.concurrency
        )));
    }

    if settings.timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if settings.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "fetch-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_user_agent_settings(settings: &UserAgentSettings) -> Result<(), ConfigError> {
    if settings.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }

    // Must be usable as a header value
    if settings.value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user-agent value contains control characters: '{}'",
            settings.value.escape_debug()
        )));
    }

    if settings.accept_language.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "accept-language contains control characters".to_string(),
        ));
    }

    if settings.robots_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "robots-name cannot be empty".to_string(),
        ));
    }

    Ok(())
}
