//! Plain text views of rendered Markdown.

use once_cell::sync::Lazy;
use regex::Regex;

// Emphasis, heading and link punctuation
static MARKDOWN_SYNTAX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#*\[\]()_`]").unwrap());

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^<>]*>").unwrap());

/// Strip Markdown syntax characters and HTML-style tags.
///
/// Link targets stay in the text: `[a](https://x)` becomes `ahttps://x`.
pub fn to_plain_text(markdown: &str) -> String {
    let without_syntax = MARKDOWN_SYNTAX.replace_all(markdown, "");
    strip_tags(&without_syntax)
}

/// Remove `<...>` tags, keeping their inner text.
pub fn strip_tags(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}

/// Count words in tag-stripped text.
///
/// A word is a whitespace-separated token holding at least one letter, so
/// bare numbers and punctuation are not counted.
pub fn word_count(text: &str) -> usize {
    strip_tags(text)
        .split_whitespace()
        .filter(|token| token.chars().any(char::is_alphabetic))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_plain_text() {
        assert_eq!(to_plain_text("## Hello **world**"), " Hello world");
        assert_eq!(to_plain_text("[**_hi_**](https://x)"), "hihttps://x");
        assert_eq!(to_plain_text("`code` and <b>bold</b>"), "code and bold");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Text</p><br/>"), "Text");
        assert_eq!(strip_tags("a < b"), "a < b");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("Hello, world! 42 times"), 3);
        assert_eq!(word_count("<em>Un</em> deux"), 2);
        assert_eq!(word_count(""), 0);
    }
}
