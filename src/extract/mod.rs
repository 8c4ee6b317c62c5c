//! Content extraction for fetched pages
//!
//! Turns one page's HTML into cleaned plain text, a title, and the email
//! addresses found in that text. Extraction is a pure function of its input:
//! no network access and no crawl state.
//!
//! The pipeline is a fixed sequence of transformations:
//! 1. [`dom::strip_noise`] removes non-content and boilerplate elements
//! 2. [`dom::select_main`] picks the main-content subtree
//! 3. [`dom::flatten`] turns the subtree into structured text
//! 4. [`fold_to_ascii`] (optional) folds typographic Unicode to ASCII
//! 5. [`normalize_text`] collapses whitespace and drops noise lines
//! 6. [`extract_emails`] harvests addresses from the cleaned text

mod ascii;
mod dom;
mod email;
mod text;

pub use ascii::fold_to_ascii;
pub use dom::{extract_title, flatten, select_main, strip_noise};
pub use email::extract_emails;
pub use text::normalize_text;

use scraper::Html;
use std::collections::BTreeSet;
use url::Url;

/// Options controlling text extraction
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Fold typographic punctuation and accented letters to ASCII
    pub ascii_fold: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { ascii_fold: true }
    }
}

/// What the extractor produces for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Trimmed `<title>` text, if present and non-empty
    pub title: Option<String>,

    /// Cleaned text; may be empty
    pub content: String,

    /// Email addresses found in `content`
    pub emails: BTreeSet<String>,
}

/// Extracts title, cleaned content and emails from a page
///
/// Malformed HTML never fails: the parser recovers and unparseable
/// fragments end up as text. An empty result is valid.
///
/// # Example
///
/// ```
/// use site_harvest::extract::{extract_page, ExtractOptions};
/// use url::Url;
///
/// let html = r#"<html><head><title>Hi</title></head>
///     <body><p>Contact us at jane.doe@example.com today</p></body></html>"#;
/// let url = Url::parse("https://example.com/").unwrap();
/// let page = extract_page(html, &url, ExtractOptions::default());
///
/// assert_eq!(page.title.as_deref(), Some("Hi"));
/// assert!(page.emails.contains("jane.doe@example.com"));
/// ```
pub fn extract_page(html: &str, page_url: &Url, options: ExtractOptions) -> ExtractedPage {
    let mut document = Html::parse_document(html);

    // Title lives in <head>, which strip_noise removes
    let title = extract_title(&document);

    strip_noise(&mut document);
    let raw = flatten(select_main(&document));

    let folded = if options.ascii_fold {
        fold_to_ascii(&raw)
    } else {
        raw
    };
    let content = normalize_text(&folded);
    let emails = extract_emails(&content);

    tracing::trace!(
        "Extracted {} chars and {} emails from {}",
        content.len(),
        emails.len(),
        page_url
    );

    ExtractedPage {
        title,
        content,
        emails,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    fn extract(html: &str) -> ExtractedPage {
        extract_page(html, &page_url(), ExtractOptions::default())
    }

    #[test]
    fn test_contact_sentence_yields_email() {
        let page = extract("<html><body><p>Contact us at jane.doe@example.com today</p></body></html>");
        assert_eq!(
            page.emails.into_iter().collect::<Vec<_>>(),
            vec!["jane.doe@example.com".to_string()]
        );
        assert_eq!(page.content, "Contact us at jane.doe@example.com today");
    }

    #[test]
    fn test_scripts_and_styles_never_reach_content() {
        let html = r#"<html><head><style>body { color: red; }</style></head><body>
            <script>var secret = "leaked";</script>
            <p>Visible paragraph</p>
            <noscript>Enable JavaScript please</noscript>
        </body></html>"#;
        let page = extract(html);
        assert_eq!(page.content, "Visible paragraph");
        assert!(!page.content.contains("secret"));
        assert!(!page.content.contains("color"));
    }

    #[test]
    fn test_boilerplate_regions_removed() {
        let html = r#"<html><body>
            <nav>Home About Contact</nav>
            <header>Site Header Text</header>
            <div class="sidebar">Sidebar links here</div>
            <div id="cookie-banner">We use cookies</div>
            <div class="cookieConsent">Accept all cookies</div>
            <p>Real body text</p>
            <footer>Copyright footer</footer>
        </body></html>"#;
        let page = extract(html);
        assert_eq!(page.content, "Real body text");
    }

    #[test]
    fn test_main_content_preferred_over_body() {
        let html = r#"<html><body>
            <div>Outside of main area</div>
            <main><p>Inside main area</p></main>
        </body></html>"#;
        let page = extract(html);
        assert_eq!(page.content, "Inside main area");
    }

    #[test]
    fn test_main_selector_priority() {
        let html = r#"<html><body>
            <div class="content">Generic content block</div>
            <article>Article body text</article>
        </body></html>"#;
        let page = extract(html);
        assert_eq!(page.content, "Article body text");
    }

    #[test]
    fn test_block_structure_preserved_and_short_lines_dropped() {
        let html = r#"<html><body>
            <h1>Our Team</h1>
            <p>First paragraph here.</p>
            <p>OK</p>
            <ul><li>Alice Smith</li><li>Bob Jones</li></ul>
            <p>Line one<br>Line two</p>
        </body></html>"#;
        let page = extract(html);
        assert_eq!(
            page.content,
            "Our Team\nFirst paragraph here.\nAlice Smith\nBob Jones\nLine one\nLine two"
        );
        assert!(page.content.lines().all(|l| l.trim().chars().count() > 2));
    }

    #[test]
    fn test_inline_elements_join_with_spaces() {
        let html = "<html><body><p>Call <strong>now</strong> or <a href='/x'>write</a> to us</p></body></html>";
        let page = extract(html);
        assert_eq!(page.content, "Call now or write to us");
    }

    #[test]
    fn test_title_extraction() {
        let page = extract("<html><head><title>  Acme Corp  </title></head><body></body></html>");
        assert_eq!(page.title.as_deref(), Some("Acme Corp"));

        let page = extract("<html><head></head><body>No title here</body></html>");
        assert_eq!(page.title, None);

        let page = extract("<html><head><title>   </title></head><body></body></html>");
        assert_eq!(page.title, None);
    }

    #[test]
    fn test_malformed_html_degrades_to_text() {
        let page = extract("<div><p>Unclosed paragraph <b>bold <i>mixed</div></p> trailing words");
        assert!(page.content.contains("Unclosed paragraph"));
        assert!(page.content.contains("trailing words"));
    }

    #[test]
    fn test_empty_document_is_valid() {
        let page = extract("");
        assert_eq!(page.content, "");
        assert!(page.emails.is_empty());
        assert_eq!(page.title, None);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = r#"<html><head><title>T</title></head><body>
            <article><p>Write to info@example.org — we reply fast…</p></article>
        </body></html>"#;
        assert_eq!(extract(html), extract(html));
    }

    #[test]
    fn test_ascii_fold_applied_before_emails() {
        let html = "<html><body><p>Email\u{00a0}address:\u{00a0}sales@example.com</p><p>Caf\u{e9} \u{201c}menu\u{201d}</p></body></html>";
        let page = extract(html);
        assert!(page.emails.contains("sales@example.com"));
        assert!(page.content.contains("Cafe \"menu\""));
    }

    #[test]
    fn test_ascii_fold_can_be_disabled() {
        let html = "<html><body><p>Caf\u{e9} \u{2014} open daily</p></body></html>";
        let page = extract_page(html, &page_url(), ExtractOptions { ascii_fold: false });
        assert_eq!(page.content, "Caf\u{e9} \u{2014} open daily");
    }

    #[test]
    fn test_whitespace_in_markup_does_not_change_emails() {
        let compact = "<html><body><p>Mail ops@example.net now</p></body></html>";
        let spaced = "<html>\n  <body>\n\n    <p>   Mail\n   ops@example.net\n   now   </p>\n  </body>\n</html>";
        assert_eq!(extract(compact).emails, extract(spaced).emails);
    }
}
