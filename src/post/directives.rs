//! Metadata directives embedded in the document body.
//!
//! Authors put labeled lines such as `Tags: rust, wasm` or `Statut: publish`
//! in the document. Each directive kind is matched once, in a fixed order,
//! and the matched line is removed from the post body.

use once_cell::sync::Lazy;
use regex::Regex;

use super::excerpt::{generate_excerpt, DEFAULT_EXCERPT_LENGTH};
use super::{ContentRecord, PostStatus};

// Label, colon and value share one line: `[ \t]*` rather than `\s*`, so an
// empty `Tags:` line never takes the next paragraph as its value.
static CATEGORIES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^(?:cat[ée]gories?|category)[ \t]*:[ \t]*(.+)$").unwrap());

static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?im)^tags?[ \t]*:[ \t]*(.+)$").unwrap());

static AUTHOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^(?:auteur|author)[ \t]*:[ \t]*(.+)$").unwrap());

static DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^description[ \t]*:[ \t]*(.+)$").unwrap());

static KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^(?:mot-cl[ée]?s?|keywords?)[ \t]*:[ \t]*(.+)$").unwrap()
});

static EXCERPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^(?:extrait|excerpt)[ \t]*:[ \t]*(.+)$").unwrap());

// Only valid values match, so an invalid status line is never consumed.
static STATUS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^(?:statut|status)[ \t]*:[ \t]*(publish|draft|private)[ \t]*$").unwrap()
});

static EXTRA_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// A kind of metadata directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `Catégories: Web, Design`
    Categories,
    /// `Tags: a, b`
    Tags,
    /// `Auteur: jdoe`
    Author,
    /// `Description: ...` (SEO meta description)
    Description,
    /// `Mot-clé: ...` (SEO focus keyword)
    Keyword,
    /// `Extrait: ...`
    Excerpt,
    /// `Statut: publish|draft|private`
    Status,
}

impl DirectiveKind {
    /// All kinds, in the order they are applied.
    pub const ALL: [DirectiveKind; 7] = [
        DirectiveKind::Categories,
        DirectiveKind::Tags,
        DirectiveKind::Author,
        DirectiveKind::Description,
        DirectiveKind::Keyword,
        DirectiveKind::Excerpt,
        DirectiveKind::Status,
    ];

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            DirectiveKind::Categories => "categories",
            DirectiveKind::Tags => "tags",
            DirectiveKind::Author => "author",
            DirectiveKind::Description => "description",
            DirectiveKind::Keyword => "keyword",
            DirectiveKind::Excerpt => "excerpt",
            DirectiveKind::Status => "status",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            DirectiveKind::Categories => &CATEGORIES,
            DirectiveKind::Tags => &TAGS,
            DirectiveKind::Author => &AUTHOR,
            DirectiveKind::Description => &DESCRIPTION,
            DirectiveKind::Keyword => &KEYWORD,
            DirectiveKind::Excerpt => &EXCERPT,
            DirectiveKind::Status => &STATUS,
        }
    }
}

/// Extract directives from `record.body` into the record's metadata fields.
///
/// Uses the default excerpt length when an excerpt has to be synthesized.
pub fn extract_metadata(record: &mut ContentRecord) {
    extract_metadata_with(record, DEFAULT_EXCERPT_LENGTH);
}

/// Extract directives, synthesizing a missing excerpt of at most `excerpt_length` characters.
///
/// The first line matching each kind is parsed and removed; later duplicates
/// stay in the body. If nothing but directives was present, the original
/// body is kept so the post is never emptied.
pub fn extract_metadata_with(record: &mut ContentRecord, excerpt_length: usize) {
    let original = record.body.clone();
    let mut body = record.body.clone();

    for kind in DirectiveKind::ALL {
        let (range, value) = match kind.pattern().captures(&body) {
            Some(caps) => (
                caps.get_match().range(),
                caps.get(1).map_or("", |m| m.as_str()).trim().to_string(),
            ),
            None => continue,
        };

        if apply_directive(record, kind, &value) {
            log::debug!("Extracted {} directive: {:?}", kind.name(), value);
            body.replace_range(range, "");
        }
    }

    let cleaned = EXTRA_BLANK_LINES
        .replace_all(body.trim(), "\n\n")
        .trim()
        .to_string();

    if cleaned.is_empty() {
        if !original.trim().is_empty() {
            log::warn!("Body holds only directives; keeping the original text");
        }
        record.body = original;
    } else {
        record.body = cleaned;
    }

    if record.excerpt.is_empty() && !record.body.is_empty() {
        record.excerpt = generate_excerpt(&record.body, excerpt_length);
    }
}

fn apply_directive(record: &mut ContentRecord, kind: DirectiveKind, value: &str) -> bool {
    match kind {
        DirectiveKind::Categories => record.categories = split_list(value),
        DirectiveKind::Tags => record.tags = split_list(value),
        DirectiveKind::Author => record.author = value.to_string(),
        DirectiveKind::Description => record.meta_description = value.to_string(),
        DirectiveKind::Keyword => record.target_keyword = value.to_string(),
        DirectiveKind::Excerpt => record.excerpt = value.to_string(),
        DirectiveKind::Status => match value.parse::<PostStatus>() {
            Ok(status) => record.status = status,
            Err(_) => return false,
        },
    }
    true
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(body: &str) -> ContentRecord {
        let mut record = ContentRecord::with_body("Title", body);
        extract_metadata(&mut record);
        record
    }

    #[test]
    fn test_extract_all_kinds() {
        let record = extracted(
            "Catégories: Web, Design\n\
             Tags: rust, , wasm\n\
             Auteur: jdoe\n\
             Description: A short summary\n\
             Mot-clé: rust wasm\n\
             Extrait: Custom excerpt\n\
             Statut: publish\n\n\
             Real content here.",
        );

        assert_eq!(record.categories, vec!["Web", "Design"]);
        assert_eq!(record.tags, vec!["rust", "wasm"]);
        assert_eq!(record.author, "jdoe");
        assert_eq!(record.meta_description, "A short summary");
        assert_eq!(record.target_keyword, "rust wasm");
        assert_eq!(record.excerpt, "Custom excerpt");
        assert_eq!(record.status, PostStatus::Publish);
        assert_eq!(record.body, "Real content here.");
    }

    #[test]
    fn test_value_must_be_on_the_label_line() {
        let body = "Tags:\n\nrust, wasm\n\nBody";
        let record = extracted(body);
        assert!(record.tags.is_empty());
        assert_eq!(record.body, body);

        let record = extracted("Catégories:\nNews\nBody");
        assert!(record.categories.is_empty());
        assert_eq!(record.body, "Catégories:\nNews\nBody");
    }

    #[test]
    fn test_english_labels_case_insensitive() {
        let record = extracted(
            "Intro\n\nCATEGORY: News\nauthor: a@b.c\nKeywords: seo\nExcerpt: Short\nstatus: Private\n\nEnd",
        );
        assert_eq!(record.categories, vec!["News"]);
        assert_eq!(record.author, "a@b.c");
        assert_eq!(record.target_keyword, "seo");
        assert_eq!(record.excerpt, "Short");
        assert_eq!(record.status, PostStatus::Private);
        assert_eq!(record.body, "Intro\n\nEnd");
    }

    #[test]
    fn test_directive_must_start_line() {
        let record = extracted("See the Tags: section below.");
        assert!(record.tags.is_empty());
        assert_eq!(record.body, "See the Tags: section below.");
    }

    #[test]
    fn test_body_of_only_directives_is_restored() {
        let body = "Catégories: X\nTags: Y\n";
        let record = extracted(body);

        assert_eq!(record.body, body);
        assert_eq!(record.categories, vec!["X"]);
        assert_eq!(record.tags, vec!["Y"]);
    }

    #[test]
    fn test_invalid_status_is_left_in_body() {
        let record = extracted("Statut: foo\n\nHello");
        assert_eq!(record.status, PostStatus::Draft);
        assert_eq!(record.body, "Statut: foo\n\nHello");
    }

    #[test]
    fn test_status_with_trailing_blanks() {
        let record = extracted("Hello\n\nStatut: DRAFT  ");
        assert_eq!(record.status, PostStatus::Draft);
        assert_eq!(record.body, "Hello");
    }

    #[test]
    fn test_duplicate_directive_kept_verbatim() {
        let record = extracted("Tags: first\n\nParagraph\n\nTags: second");
        assert_eq!(record.tags, vec!["first"]);
        assert_eq!(record.body, "Paragraph\n\nTags: second");
    }

    #[test]
    fn test_identical_duplicate_lines_only_first_removed() {
        let record = extracted("Tags: a\n\nText\n\nTags: a");
        assert_eq!(record.tags, vec!["a"]);
        assert_eq!(record.body, "Text\n\nTags: a");
    }

    #[test]
    fn test_blank_lines_are_collapsed() {
        let record = extracted("One\n\nTags: x\n\nTwo\n\n\n\n\nThree");
        assert_eq!(record.body, "One\n\nTwo\n\nThree");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let mut record = ContentRecord::with_body(
            "Title",
            "Tags: a, b\n\nBody text\n\nStatut: private\n\nTags: again",
        );
        extract_metadata(&mut record);
        let once = record.clone();
        extract_metadata(&mut record);
        assert_eq!(record, once);
    }

    #[test]
    fn test_excerpt_synthesized_from_final_body() {
        let record = extracted("Tags: a\n\n## Heading\n\nSome **bold** text.");
        assert_eq!(record.excerpt, "Heading\n\nSome bold text.");
    }

    #[test]
    fn test_excerpt_length_is_configurable() {
        let mut record = ContentRecord::with_body("T", "one two three four five");
        extract_metadata_with(&mut record, 10);
        assert_eq!(record.excerpt, "one two...");
    }

    #[test]
    fn test_empty_body_stays_empty() {
        let record = extracted("");
        assert_eq!(record.body, "");
        assert_eq!(record.excerpt, "");
    }

    #[test]
    fn test_empty_value_clears_list() {
        let record = extracted("Tags: ,  ,\nText");
        assert!(record.tags.is_empty());
        assert_eq!(record.body, "Text");
    }
}
