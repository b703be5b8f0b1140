//! Document-to-post conversion.
//!
//! A conversion builds a fresh [`ContentRecord`] from a [`Document`]: the
//! title and slug, the Markdown body, the metadata directives mined out of
//! it, and an excerpt. Conversion never fails once a document is decoded;
//! anything lost along the way is reported as a diagnostic on the
//! [`ParseOutcome`].
//!
//! # Example
//!
//! ```
//! use docpress::convert::{convert_document, ConvertOptions};
//! use docpress::model::{Document, StructuralElement};
//!
//! let mut doc = Document::new("Hello");
//! doc.add_element(StructuralElement::paragraph("Tags: a, b\n"));
//! doc.add_element(StructuralElement::paragraph("Body text\n"));
//!
//! let outcome = convert_document(&doc, &ConvertOptions::default());
//! assert!(outcome.is_clean());
//! assert_eq!(outcome.record.tags, vec!["a", "b"]);
//! assert_eq!(outcome.record.body, "Body text");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::Document;
use crate::parser::{DocsParser, ParseOptions};
use crate::post::{
    extract_metadata_with, generate_excerpt, slugify, ContentRecord, DEFAULT_EXCERPT_LENGTH,
};
use crate::render::text::word_count;
use crate::render::{ExtractionStats, MarkdownRenderer, RenderOptions};

/// Excerpt length used by previews.
pub const DEFAULT_PREVIEW_LENGTH: usize = 300;

/// Options for document conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Rendering options
    pub render: RenderOptions,

    /// JSON decoding options
    pub parse: ParseOptions,

    /// Maximum length of a synthesized excerpt
    pub excerpt_length: usize,

    /// Whether to derive the slug from the title
    pub generate_slug: bool,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set JSON decoding options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Skip malformed elements instead of rejecting the document.
    pub fn lenient(mut self) -> Self {
        self.parse = self.parse.lenient();
        self
    }

    /// Set the synthesized excerpt length.
    pub fn with_excerpt_length(mut self, length: usize) -> Self {
        self.excerpt_length = length;
        self
    }

    /// Enable or disable slug generation.
    pub fn with_slug(mut self, generate: bool) -> Self {
        self.generate_slug = generate;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.render.collect_stats = collect;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            parse: ParseOptions::default(),
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            generate_slug: true,
        }
    }
}

/// Result of converting one document.
///
/// The record is always usable; `diagnostics` lists what was skipped or
/// defaulted while producing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// The converted record
    pub record: ContentRecord,

    /// Problems met during decoding or conversion
    #[serde(default)]
    pub diagnostics: Vec<String>,

    /// Rendering statistics (if collected)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<ExtractionStats>,
}

impl ParseOutcome {
    /// Create an outcome without diagnostics.
    pub fn new(record: ContentRecord) -> Self {
        Self {
            record,
            diagnostics: Vec::new(),
            stats: None,
        }
    }

    /// Check whether the conversion was lossless.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Problems met during conversion.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Take the record, dropping diagnostics.
    pub fn into_record(self) -> ContentRecord {
        self.record
    }
}

/// A short summary of a document shown before importing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentPreview {
    /// Document title
    pub title: String,

    /// Plain-text excerpt of the converted body
    pub excerpt: String,

    /// Categories named by directives
    pub categories: Vec<String>,

    /// Tags named by directives
    pub tags: Vec<String>,

    /// Words in the converted body
    pub word_count: usize,
}

/// Convert a decoded document into a content record.
pub fn convert_document(document: &Document, options: &ConvertOptions) -> ParseOutcome {
    log::debug!(
        "Converting document {:?} ({} elements)",
        document.title,
        document.elements().len()
    );

    let mut outcome = ParseOutcome::new(ContentRecord::new(document.title.clone()));

    if document.title.trim().is_empty() {
        outcome.diagnostics.push("Document has no title".to_string());
    }

    if options.generate_slug {
        outcome.record.slug = slugify(&document.title);
    }

    let renderer = MarkdownRenderer::new(options.render.clone());
    if options.render.collect_stats {
        let result = renderer.render_with_stats(document);
        outcome.record.body = result.content;
        outcome.stats = Some(result.stats);
    } else {
        outcome.record.body = renderer.render(document);
    }

    if outcome.record.body.is_empty() {
        outcome.diagnostics.push("Document body is empty".to_string());
    }

    extract_metadata_with(&mut outcome.record, options.excerpt_length);
    outcome
}

/// Decode Docs JSON and convert it, merging decode diagnostics into the outcome.
pub fn convert_json(json: &str, options: &ConvertOptions) -> Result<ParseOutcome> {
    let parsed = DocsParser::from_json_with_options(json, options.parse.clone())?.parse()?;
    Ok(with_parse_diagnostics(parsed.diagnostics, &parsed.document, options))
}

/// Read a Docs JSON export from disk and convert it.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<ParseOutcome> {
    let parsed = DocsParser::open_with_options(path, options.parse.clone())?.parse()?;
    Ok(with_parse_diagnostics(parsed.diagnostics, &parsed.document, options))
}

pub(crate) fn with_parse_diagnostics(
    mut diagnostics: Vec<String>,
    document: &Document,
    options: &ConvertOptions,
) -> ParseOutcome {
    let mut outcome = convert_document(document, options);
    outcome.diagnostics.retain(|message| !diagnostics.contains(message));
    diagnostics.append(&mut outcome.diagnostics);
    outcome.diagnostics = diagnostics;
    outcome
}

/// Summarize a document with an excerpt of at most `max_length` characters.
pub fn preview(document: &Document, max_length: usize) -> DocumentPreview {
    let record = convert_document(document, &ConvertOptions::default()).into_record();

    DocumentPreview {
        excerpt: generate_excerpt(&record.body, max_length),
        word_count: word_count(&record.body),
        title: record.title,
        categories: record.categories,
        tags: record.tags,
    }
}

/// Check whether a document can be imported as a post.
pub fn can_import(document: &Document) -> bool {
    !document.title.trim().is_empty()
}
