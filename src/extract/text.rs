/// Lines at or below this many characters are treated as noise
const MIN_LINE_CHARS: usize = 2;

/// Normalizes flattened text into the final content form
///
/// Each line has its whitespace runs collapsed to one space and is trimmed;
/// lines of two characters or fewer (blank lines included) are dropped, and
/// the survivors are joined with `\n`.
///
/// # Examples
///
/// ```
/// use site_harvest::extract::normalize_text;
///
/// let raw = "\n  Hello    world \n\n\n|\nSecond   line\n";
/// assert_eq!(normalize_text(raw), "Hello world\nSecond line");
/// ```
pub fn normalize_text(raw: &str) -> String {
    raw.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| line.chars().count() > MIN_LINE_CHARS)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_inner_spaces() {
        assert_eq!(normalize_text("a  lot   of    space"), "a lot of space");
    }

    #[test]
    fn test_collapses_tabs_and_nbsp() {
        assert_eq!(normalize_text("tab\there\u{00a0}\u{00a0}nbsp"), "tab here nbsp");
    }

    #[test]
    fn test_drops_short_lines() {
        assert_eq!(normalize_text("ok\nabc\n |\n  x  \nfine"), "abc\nfine");
    }

    #[test]
    fn test_multibyte_chars_count_as_one() {
        assert_eq!(normalize_text("日本\n日本語"), "日本語");
    }

    #[test]
    fn test_no_blank_lines_survive() {
        let out = normalize_text("first\n\n\n\n\nsecond\r\n\r\nthird");
        assert_eq!(out, "first\nsecond\nthird");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text("\n \n\t\n"), "");
    }
}
