use crate::config::types::CrawlProfile;
use crate::config::validation::validate_profile;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a crawl profile from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML profile file
///
/// # Returns
///
/// * `Ok(CrawlProfile)` - Successfully loaded and validated profile
/// * `Err(ConfigError)` - Failed to load, parse, or validate the profile
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_harvest::config::load_profile;
///
/// let profile = load_profile(Path::new("profile.toml")).unwrap();
/// println!("Workers: {}", profile.crawler.concurrency);
/// ```
pub fn load_profile(path: &Path) -> Result<CrawlProfile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let profile: CrawlProfile = toml::from_str(&content)?;
    validate_profile(&profile)?;
    Ok(profile)
}

/// Computes a SHA-256 hash of the profile file content
///
/// Logged at startup so two runs can be matched to the same settings.
pub fn compute_profile_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Loads a profile and returns both the profile and its hash
pub fn load_profile_with_hash(path: &Path) -> Result<(CrawlProfile, String), ConfigError> {
    let profile = load_profile(path)?;
    let hash = compute_profile_hash(path)?;
    Ok((profile, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_profile(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_profile() {
        let content = r#"
[crawler]
request-delay-ms = 500
concurrency = 4
timeout-secs = 120
fetch-timeout-secs = 10
respect-robots = false
ascii-fold = false

[user-agent]
value = "TestBot/1.0"
accept-language = "de"
"#;

        let file = create_temp_profile(content);
        let profile = load_profile(file.path()).unwrap();

        assert_eq!(profile.crawler.request_delay_ms, 500);
        assert_eq!(profile.crawler.concurrency, 4);
        assert_eq!(profile.crawler.timeout_secs, 120);
        assert_eq!(profile.crawler.fetch_timeout_secs, 10);
        assert!(!profile.crawler.respect_robots);
        assert!(!profile.crawler.ascii_fold);
        assert_eq!(profile.user_agent.value, "TestBot/1.0");
        assert_eq!(profile.user_agent.accept_language, "de");
    }

    #[test]
    fn test_empty_profile_uses_defaults() {
        let file = create_temp_profile("");
        let profile = load_profile(file.path()).unwrap();

        assert_eq!(profile.crawler.request_delay_ms, 1000);
        assert_eq!(profile.crawler.concurrency, 1);
        assert_eq!(profile.crawler.timeout_secs, 300);
        assert!(profile.crawler.respect_robots);
        assert!(profile.crawler.ascii_fold);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let file = create_temp_profile("[crawler]\nconcurrency = 8\n");
        let profile = load_profile(file.path()).unwrap();

        assert_eq!(profile.crawler.concurrency, 8);
        assert_eq!(profile.crawler.request_delay_ms, 1000);
    }

    #[test]
    fn test_load_profile_with_invalid_path() {
        let result = load_profile(Path::new("/nonexistent/profile.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_profile_with_invalid_toml() {
        let file = create_temp_profile("this is not valid TOML {{{");
        let result = load_profile(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_profile_with_validation_error() {
        let file = create_temp_profile("[crawler]\nconcurrency = 0\n");
        let result = load_profile(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_profile_hash_is_stable() {
        let file = create_temp_profile("[crawler]\nconcurrency = 2\n");

        let hash1 = compute_profile_hash(file.path()).unwrap();
        let hash2 = compute_profile_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_profile("[crawler]\nconcurrency = 2\n");
        let file2 = create_temp_profile("[crawler]\nconcurrency = 3\n");

        let (_, hash1) = load_profile_with_hash(file1.path()).unwrap();
        let (_, hash2) = load_profile_with_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
