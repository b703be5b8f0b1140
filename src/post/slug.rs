//! URL slugs for post titles and category names.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::render::text::strip_tags;

/// Derive a lowercase ASCII slug from a title.
///
/// Accents are folded (`é` to `e`), whitespace, dots and slashes become
/// dashes, other punctuation is dropped, and dash runs are collapsed.
///
/// ```
/// assert_eq!(docpress::slugify("Été à Paris!"), "ete-a-paris");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());

    for c in strip_tags(title)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        if let Some(folded) = fold_letter(c) {
            slug.push_str(folded);
        } else if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if c.is_whitespace() || matches!(c, '-' | '.' | '/') {
            if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

// Letters that do not decompose into a base letter plus a mark.
fn fold_letter(c: char) -> Option<&'static str> {
    let folded = match c {
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'ø' => "o",
        'đ' | 'ð' => "d",
        'ł' => "l",
        'þ' => "th",
        _ => return None,
    };
    Some(folded)
}
