use unicode_normalization::UnicodeNormalization;

/// Typographic characters and their ASCII replacements
const REPLACEMENTS: &[(char, &str)] = &[
    ('\u{2022}', "*"),   // bullet
    ('\u{2019}', "'"),   // right single quote
    ('\u{2018}', "'"),   // left single quote
    ('\u{201c}', "\""),  // left double quote
    ('\u{201d}', "\""),  // right double quote
    ('\u{2013}', "-"),   // en dash
    ('\u{2014}', "--"),  // em dash
    ('\u{2026}', "..."), // ellipsis
    ('\u{00a0}', " "),   // no-break space
    ('\u{2192}', "->"),  // right arrow
    ('\u{2190}', "<-"),  // left arrow
];

/// Folds text to ASCII
///
/// Typographic punctuation is replaced from a fixed table first; everything
/// else is NFKD-decomposed and any remaining non-ASCII character is dropped.
///
/// # Examples
///
/// ```
/// use site_harvest::extract::fold_to_ascii;
///
/// assert_eq!(fold_to_ascii("Caf\u{e9} \u{2014} \u{201c}open\u{201d}\u{2026}"), "Cafe -- \"open\"...");
/// ```
pub fn fold_to_ascii(text: &str) -> String {
    let mut replaced = String::with_capacity(text.len());
    for c in text.chars() {
        match REPLACEMENTS.iter().find(|(from, _)| *from == c) {
            Some((_, to)) => replaced.push_str(to),
            None => replaced.push(c),
        }
    }

    replaced
        .nfkd()
        .filter(|c| c.is_ascii() || matches!(c, '\n' | '\r' | '\t'))
        .collect()
}
