use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// General email shape: `local@domain.tld`
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
        .expect("email pattern is valid")
});

/// Addresses labelled `Email:` / `Email address:` in contact blocks
static LABELLED_EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)email\s*(?:address)?:?\s*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})")
        .expect("labelled email pattern is valid")
});

/// Harvests email addresses from cleaned text
///
/// Runs the general pattern and the label-anchored pattern over the text
/// and returns their deduplicated union.
///
/// # Examples
///
/// ```
/// use site_harvest::extract::extract_emails;
///
/// let emails = extract_emails("Email: sales@example.com or support@example.com");
/// assert_eq!(emails.len(), 2);
/// assert!(emails.contains("sales@example.com"));
/// ```
pub fn extract_emails(text: &str) -> BTreeSet<String> {
    let mut emails: BTreeSet<String> = EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    emails.extend(
        LABELLED_EMAIL_RE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string()),
    );

    emails
}
