//! Excerpt generation.

use crate::render::text::to_plain_text;

/// Excerpt length used when none is configured.
pub const DEFAULT_EXCERPT_LENGTH: usize = 160;

/// Build a plain-text excerpt of at most `max_length` characters (plus `...`).
///
/// Markdown syntax and tags are stripped first. Longer text is cut at
/// `max_length` characters and then backed up to the last whitespace so no
/// word is split. A single word longer than the limit yields just `...`.
pub fn generate_excerpt(content: &str, max_length: usize) -> String {
    let plain = to_plain_text(content);
    let plain = plain.trim();

    if plain.chars().count() <= max_length {
        return plain.to_string();
    }

    let cut = match plain.char_indices().nth(max_length) {
        Some((idx, _)) => &plain[..idx],
        None => plain,
    };

    let head = match cut.rfind(char::is_whitespace) {
        Some(idx) => cut[..idx].trim_end(),
        None => "",
    };

    format!("{}...", head)
}
