//! # docpress
//!
//! Google Docs to blog post conversion for Rust.
//!
//! This library takes the structured content of a Google Docs document
//! (the Docs API v1 `documents.get` JSON), renders it to Markdown, mines
//! metadata directives such as `Catégories:` or `Statut:` out of the text,
//! and produces a post record ready to be published to WordPress.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docpress::{convert_file, ConvertOptions};
//!
//! fn main() -> docpress::Result<()> {
//!     let outcome = convert_file("document.json", &ConvertOptions::default())?;
//!     for warning in outcome.diagnostics() {
//!         eprintln!("warning: {}", warning);
//!     }
//!
//!     println!("{}", outcome.record.title);
//!     println!("{}", outcome.record.body);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Markdown rendering**: headings, bold/italic/links, tables, nested tables
//! - **Metadata directives**: categories, tags, author, SEO fields, excerpt, status
//! - **Lenient parsing**: malformed elements are skipped and reported
//! - **Google** (`google` feature): OAuth2 flow, Drive listing, Docs retrieval
//! - **WordPress** (`wordpress` feature): post creation over the REST API
//! - **FFI** (`ffi` feature): C ABI for PHP FFI and other hosts

pub mod convert;
pub mod error;
pub mod import;
pub mod model;
pub mod parser;
pub mod post;
pub mod render;

#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "google")]
pub mod google;

#[cfg(feature = "wordpress")]
pub mod wordpress;

// Re-export commonly used types
pub use convert::{
    can_import, convert_document, convert_file, convert_json, preview, ConvertOptions,
    DocumentPreview, ParseOutcome, DEFAULT_PREVIEW_LENGTH,
};
pub use error::{Error, Result};
pub use import::{
    document_id_from_url, DirectorySource, DocumentSource, ImportReport, Importer, MemorySink,
    PostSink, PublishedPost,
};
pub use model::{
    Document, DocumentSummary, Paragraph, ParagraphElement, StructuralElement, Table, TableCell,
    TableRow, TextRun, TextStyle,
};
pub use parser::{DocsParser, ErrorMode, ParseOptions, ParsedDocument};
pub use post::{
    extract_metadata, generate_excerpt, slugify, ContentRecord, PostStatus,
    DEFAULT_EXCERPT_LENGTH,
};
pub use render::{render_content, JsonFormat, RenderOptions};

use std::io::Read;
use std::path::Path;

/// Parse Docs JSON into a document.
///
/// # Example
///
/// ```
/// use docpress::parse_json;
///
/// let doc = parse_json(r#"{"title": "Hello", "body": {"content": []}}"#).unwrap();
/// assert_eq!(doc.title, "Hello");
/// ```
pub fn parse_json(json: &str) -> Result<Document> {
    let parsed = DocsParser::from_json(json)?.parse()?;
    Ok(parsed.document)
}

/// Parse Docs JSON with custom options, keeping decode diagnostics.
///
/// # Example
///
/// ```
/// use docpress::{parse_json_with_options, ParseOptions};
///
/// let json = r#"{"title": "T", "body": {"content": [{"table": {"tableRows": 1}}]}}"#;
/// let parsed = parse_json_with_options(json, ParseOptions::new().lenient()).unwrap();
/// assert_eq!(parsed.diagnostics.len(), 1);
/// ```
pub fn parse_json_with_options(json: &str, options: ParseOptions) -> Result<ParsedDocument> {
    DocsParser::from_json_with_options(json, options)?.parse()
}

/// Parse a Docs JSON export file.
///
/// # Example
///
/// ```no_run
/// use docpress::parse_file;
///
/// let doc = parse_file("document.json").unwrap();
/// println!("{} elements", doc.elements().len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parsed = DocsParser::open(path)?.parse()?;
    Ok(parsed.document)
}

/// Parse a Docs JSON export file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ParseOptions,
) -> Result<ParsedDocument> {
    DocsParser::open_with_options(path, options)?.parse()
}

/// Parse Docs JSON from a reader.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parsed = DocsParser::from_reader(reader)?.parse()?;
    Ok(parsed.document)
}

/// Convert a Docs JSON export file to Markdown.
///
/// # Example
///
/// ```no_run
/// use docpress::to_markdown;
///
/// let markdown = to_markdown("document.json").unwrap();
/// std::fs::write("output.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_markdown(&doc, &RenderOptions::default()))
}

/// Convert a Docs JSON export file to Markdown with custom options.
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    options: &RenderOptions,
) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_markdown(&doc, options))
}

/// Builder for parsing and converting documents.
///
/// # Example
///
/// ```no_run
/// use docpress::DocPress;
///
/// let outcome = DocPress::new()
///     .lenient()
///     .with_excerpt_length(200)
///     .with_image_placeholder("")
///     .parse("document.json")?
///     .to_record();
/// println!("{}", outcome.record.body);
/// # Ok::<(), docpress::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocPress {
    options: ConvertOptions,
}

impl DocPress {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Set the synthesized excerpt length.
    pub fn with_excerpt_length(mut self, length: usize) -> Self {
        self.options = self.options.with_excerpt_length(length);
        self
    }

    /// Set the text rendered for inline objects.
    pub fn with_image_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.options.render = self.options.render.with_image_placeholder(placeholder);
        self
    }

    /// Cap heading levels.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.options.render = self.options.render.with_max_heading(level);
        self
    }

    /// Collect rendering statistics.
    pub fn with_stats(mut self) -> Self {
        self.options = self.options.with_stats(true);
        self
    }

    /// Leave the slug empty.
    pub fn without_slug(mut self) -> Self {
        self.options = self.options.with_slug(false);
        self
    }

    /// Parse a Docs JSON export file.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<DocPressOutput> {
        let parsed = DocsParser::open_with_options(path, self.options.parse.clone())?.parse()?;
        Ok(DocPressOutput::new(parsed, self.options))
    }

    /// Parse Docs JSON from a string.
    pub fn parse_json(self, json: &str) -> Result<DocPressOutput> {
        let parsed =
            DocsParser::from_json_with_options(json, self.options.parse.clone())?.parse()?;
        Ok(DocPressOutput::new(parsed, self.options))
    }
}

/// A parsed document with the options to convert it.
pub struct DocPressOutput {
    /// The parsed document
    pub document: Document,
    /// Decode diagnostics
    pub diagnostics: Vec<String>,
    options: ConvertOptions,
}

impl DocPressOutput {
    fn new(parsed: ParsedDocument, options: ConvertOptions) -> Self {
        Self {
            document: parsed.document,
            diagnostics: parsed.diagnostics,
            options,
        }
    }

    /// Render the body to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.document, &self.options.render)
    }

    /// Convert to a post record, including decode diagnostics.
    pub fn to_record(&self) -> ParseOutcome {
        convert::with_parse_diagnostics(self.diagnostics.clone(), &self.document, &self.options)
    }

    /// Convert to a post record serialized as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.to_record(), format)
    }

    /// Summarize the document.
    pub fn preview(&self, max_length: usize) -> DocumentPreview {
        preview(&self.document, max_length)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "documentId": "abc",
        "title": "Bonjour",
        "body": {"content": [
            {"paragraph": {
                "paragraphStyle": {"namedStyleType": "HEADING_1"},
                "elements": [{"textRun": {"content": "Titre\n"}}]
            }},
            {"paragraph": {"elements": [{"textRun": {"content": "Auteur: jdoe\n"}}]}},
            {"paragraph": {"elements": [{"inlineObjectElement": {"inlineObjectId": "kix.1"}}]}}
        ]}
    }"#;

    #[test]
    fn test_docpress_builder() {
        let builder = DocPress::new().lenient().with_excerpt_length(20).without_slug();

        assert!(matches!(builder.options.parse.error_mode, ErrorMode::Lenient));
        assert_eq!(builder.options.excerpt_length, 20);
        assert!(!builder.options.generate_slug);
    }

    #[test]
    fn test_docpress_builder_default() {
        let builder = DocPress::default();
        assert_eq!(builder.options.excerpt_length, DEFAULT_EXCERPT_LENGTH);
        assert!(!builder.options.render.collect_stats);
    }

    #[test]
    fn test_builder_parse_json() {
        let output = DocPress::new()
            .with_image_placeholder("(image)")
            .with_max_heading(2)
            .parse_json(DOC)
            .unwrap();

        assert_eq!(output.to_markdown(), "# Titre\n\nAuteur: jdoe\n\n(image)");

        let outcome = output.to_record();
        assert_eq!(outcome.record.author, "jdoe");
        assert_eq!(outcome.record.body, "# Titre\n\n(image)");
        assert_eq!(outcome.record.slug, "bonjour");
    }

    #[test]
    fn test_builder_to_json() {
        let output = DocPress::new().parse_json(DOC).unwrap();
        let json = output.to_json(JsonFormat::Compact).unwrap();
        assert!(json.contains("\"author\":\"jdoe\""));
    }

    #[test]
    fn test_builder_parse_invalid_json() {
        assert!(DocPress::new().parse_json("not json").is_err());
    }

    #[test]
    fn test_parse_json_strict() {
        let doc = parse_json(DOC).unwrap();
        assert_eq!(doc.document_id, "abc");
        assert_eq!(doc.elements().len(), 3);

        let malformed = r#"{"title": "T", "body": {"content": [{"paragraph": 5}]}}"#;
        assert!(matches!(parse_json(malformed), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_reader() {
        let doc = parse_reader(DOC.as_bytes()).unwrap();
        assert_eq!(doc.title, "Bonjour");
    }
}
