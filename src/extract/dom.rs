//! DOM-level cleanup, main-content detection and text flattening

use once_cell::sync::Lazy;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Elements that never carry readable content
const NON_CONTENT: &[&str] = &["script", "style", "noscript", "meta", "link", "head"];

/// Presentational and boilerplate regions
const BOILERPLATE: &[&str] = &[
    "nav",
    "header",
    "footer",
    ".navigation",
    ".menu",
    ".sidebar",
    ".widget",
    ".advertisement",
    ".ad",
    r#"[class*="cookie"]"#,
    r#"[id*="cookie"]"#,
];

/// Main-content candidates, highest priority first
const MAIN_CONTENT: &[&str] = &[
    "main",
    "article",
    r#"[role="main"]"#,
    ".content",
    ".main-content",
    "#content",
    "#main",
    ".post-content",
    ".entry-content",
    ".article-content",
];

/// Tags that start and end a line when flattened
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "h1", "h2", "h3", "h4", "h5", "h6", "li", "td", "th",
];

fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .filter_map(|s| match Selector::parse(s) {
            Ok(selector) => Some(selector),
            Err(e) => {
                tracing::error!("Invalid built-in selector {}: {:?}", s, e);
                None
            }
        })
        .collect()
}

static NOISE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    let all: Vec<&str> = NON_CONTENT.iter().chain(BOILERPLATE).copied().collect();
    compile(&all)
});

static MAIN_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| compile(MAIN_CONTENT));

static TITLE_SELECTOR: Lazy<Vec<Selector>> = Lazy::new(|| compile(&["title"]));

static BODY_SELECTOR: Lazy<Vec<Selector>> = Lazy::new(|| compile(&["body"]));

/// Returns the trimmed text of the first `<title>`, if non-empty
pub fn extract_title(document: &Html) -> Option<String> {
    let selector = TITLE_SELECTOR.first()?;

    document
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Detaches non-content and boilerplate elements from the document
///
/// Matches are collected first and detached afterwards, so nested matches
/// are handled no matter which one is removed first.
pub fn strip_noise(document: &mut Html) {
    let ids: Vec<_> = NOISE_SELECTORS
        .iter()
        .flat_map(|selector| document.select(selector).map(|el| el.id()))
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Picks the subtree most likely to hold the page's primary content
///
/// Tries each main-content selector in priority order and takes the first
/// match; falls back to `<body>`, then to the document root.
pub fn select_main(document: &Html) -> ElementRef<'_> {
    MAIN_SELECTORS
        .iter()
        .chain(BODY_SELECTOR.iter())
        .find_map(|selector| document.select(selector).next())
        .unwrap_or_else(|| document.root_element())
}

/// Flattens an element's subtree to text, keeping block structure
///
/// Block-level tags and `<br>` produce line boundaries; each non-empty text
/// node contributes its trimmed text followed by a single space.
pub fn flatten(element: ElementRef<'_>) -> String {
    let mut output = String::new();
    flatten_into(element, &mut output);
    output
}

fn flatten_into(element: ElementRef<'_>, output: &mut String) {
    let container = element.value().name();

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if matches!(container, "script" | "style") {
                    continue;
                }
                let t = text.trim();
                if !t.is_empty() {
                    output.push_str(t);
                    output.push(' ');
                }
            }
            Node::Element(el) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let tag = el.name();
                if tag == "br" {
                    output.push('\n');
                    continue;
                }

                let is_block = BLOCK_TAGS.contains(&tag);
                if is_block {
                    output.push('\n');
                }
                flatten_into(child_el, output);
                if is_block {
                    output.push('\n');
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_selectors_compile() {
        assert_eq!(NOISE_SELECTORS.len(), NON_CONTENT.len() + BOILERPLATE.len());
        assert_eq!(MAIN_SELECTORS.len(), MAIN_CONTENT.len());
    }

    #[test]
    fn test_strip_noise_handles_nested_matches() {
        let mut doc = Html::parse_document(
            r#"<html><body><header><nav class="menu">Menu items</nav></header><p>Kept text</p></body></html>"#,
        );
        strip_noise(&mut doc);
        let text = flatten(select_main(&doc));
        assert_eq!(text.trim(), "Kept text");
    }

    #[test]
    fn test_select_main_role_attribute() {
        let doc = Html::parse_document(
            r#"<html><body><div>Other</div><div role="main">Primary</div></body></html>"#,
        );
        let main = select_main(&doc);
        assert_eq!(main.value().attr("role"), Some("main"));
    }

    #[test]
    fn test_select_main_falls_back_to_body() {
        let doc = Html::parse_document("<html><body><span>Only span</span></body></html>");
        assert_eq!(select_main(&doc).value().name(), "body");
    }

    #[test]
    fn test_flatten_table_cells_on_separate_lines() {
        let doc = Html::parse_document(
            "<html><body><table><tr><th>Name</th><td>Jane</td></tr></table></body></html>",
        );
        let text = flatten(select_main(&doc));
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["Name", "Jane"]);
    }
}
