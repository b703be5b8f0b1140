//! Import pipeline: fetch a document, convert it, persist it as a post.
//!
//! The remote ends are traits so the pipeline runs the same against
//! Google Docs and WordPress, a directory of JSON exports, or in-memory
//! test doubles.

mod directory;
mod memory;

pub use directory::DirectorySource;
pub use memory::MemorySink;

use serde::{Deserialize, Serialize};

use crate::convert::{self, ConvertOptions, DocumentPreview, ParseOutcome};
use crate::error::{Error, Result};
use crate::model::{Document, DocumentSummary};
use crate::parser::ParsedDocument;
use crate::post::{ContentRecord, PostStatus};

/// Where documents come from.
pub trait DocumentSource {
    /// List up to `page_size` documents, most recently modified first.
    fn list_documents(&self, page_size: usize) -> Result<Vec<DocumentSummary>>;

    /// Fetch one document by id.
    fn get_document(&self, id: &str) -> Result<Document>;

    /// Fetch one document together with the diagnostics of decoding it.
    ///
    /// Sources that decode leniently override this; the default reports
    /// no diagnostics.
    fn fetch_document(&self, id: &str) -> Result<ParsedDocument> {
        Ok(ParsedDocument {
            document: self.get_document(id)?,
            diagnostics: Vec::new(),
        })
    }
}

/// Where converted records go.
pub trait PostSink {
    /// Persist a record as a post.
    fn publish(&mut self, record: &ContentRecord) -> Result<PublishedPost>;
}

/// A post created by a [`PostSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPost {
    /// Post id assigned by the backend
    pub id: u64,

    /// Public or edit link, when the backend returns one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Status the post was created with
    pub status: PostStatus,
}

/// Outcome of importing one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    /// Source document id
    pub document_id: String,

    /// Post title
    pub title: String,

    /// The created post
    pub post: PublishedPost,

    /// Problems met while converting the document
    #[serde(default)]
    pub diagnostics: Vec<String>,
}

/// Composes a [`DocumentSource`], the converter and a [`PostSink`].
pub struct Importer<S, P> {
    source: S,
    sink: P,
    options: ConvertOptions,
}

impl<S: DocumentSource, P: PostSink> Importer<S, P> {
    /// Create an importer with default conversion options.
    pub fn new(source: S, sink: P) -> Self {
        Self {
            source,
            sink,
            options: ConvertOptions::default(),
        }
    }

    /// Set conversion options.
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// The document source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The post sink.
    pub fn sink(&self) -> &P {
        &self.sink
    }

    /// Split the importer back into its parts.
    pub fn into_parts(self) -> (S, P) {
        (self.source, self.sink)
    }

    /// List importable documents.
    pub fn list(&self, page_size: usize) -> Result<Vec<DocumentSummary>> {
        self.source.list_documents(page_size)
    }

    /// Fetch and convert a document without persisting it.
    pub fn document_content(&self, id: &str) -> Result<ParseOutcome> {
        let parsed = self.source.fetch_document(id)?;
        Ok(convert::with_parse_diagnostics(
            parsed.diagnostics,
            &parsed.document,
            &self.options,
        ))
    }

    /// Fetch a document and summarize it.
    pub fn preview(&self, id: &str, max_length: usize) -> Result<DocumentPreview> {
        let document = self.source.get_document(id)?;
        Ok(convert::preview(&document, max_length))
    }

    /// Check whether a document exists and has a title.
    ///
    /// Fetch errors are logged and reported as `false`.
    pub fn can_import(&self, id: &str) -> bool {
        match self.source.get_document(id) {
            Ok(document) => convert::can_import(&document),
            Err(e) => {
                log::warn!("Cannot fetch document {}: {}", id, e);
                false
            }
        }
    }

    /// Fetch, convert and persist a document.
    pub fn import(&mut self, id: &str) -> Result<ImportReport> {
        let parsed = self.source.fetch_document(id)?;
        if !convert::can_import(&parsed.document) {
            return Err(Error::Parse(format!("Document {} has no title", id)));
        }

        let outcome =
            convert::with_parse_diagnostics(parsed.diagnostics, &parsed.document, &self.options);
        for diagnostic in outcome.diagnostics() {
            log::warn!("{}: {}", id, diagnostic);
        }

        let post = self.sink.publish(&outcome.record)?;
        log::info!(
            "Imported document {} as post {} ({})",
            id,
            post.id,
            post.status
        );

        Ok(ImportReport {
            document_id: id.to_string(),
            title: outcome.record.title,
            post,
            diagnostics: outcome.diagnostics,
        })
    }
}

/// Extract a document id from a Google Docs URL or a bare id.
///
/// ```
/// use docpress::import::document_id_from_url;
///
/// let url = "https://docs.google.com/document/d/1AbC_d-9/edit?usp=sharing";
/// assert_eq!(document_id_from_url(url).as_deref(), Some("1AbC_d-9"));
/// assert_eq!(document_id_from_url("1AbC_d-9").as_deref(), Some("1AbC_d-9"));
/// assert_eq!(document_id_from_url("https://example.com/x"), None);
/// ```
pub fn document_id_from_url(url_or_id: &str) -> Option<String> {
    let input = url_or_id.trim();

    if input.contains("docs.google.com") {
        let start = input.find("/document/d/")? + "/document/d/".len();
        let rest = &input[start..];
        let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let id = &rest[..end];
        return (!id.is_empty()).then(|| id.to_string());
    }

    let is_bare_id = !input.is_empty()
        && !input.contains('/')
        && !input.chars().any(char::is_whitespace);
    is_bare_id.then(|| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StructuralElement;
    use std::collections::HashMap;

    struct FixedSource {
        documents: HashMap<String, Document>,
    }

    impl FixedSource {
        fn with(documents: Vec<Document>) -> Self {
            Self {
                documents: documents
                    .into_iter()
                    .map(|d| (d.document_id.clone(), d))
                    .collect(),
            }
        }
    }

    impl DocumentSource for FixedSource {
        fn list_documents(&self, page_size: usize) -> Result<Vec<DocumentSummary>> {
            let mut summaries: Vec<_> = self
                .documents
                .values()
                .map(|d| DocumentSummary {
                    id: d.document_id.clone(),
                    name: d.title.clone(),
                    modified_time: None,
                    created_time: None,
                    link: None,
                })
                .collect();
            summaries.sort_by(|a, b| a.id.cmp(&b.id));
            summaries.truncate(page_size);
            Ok(summaries)
        }

        fn get_document(&self, id: &str) -> Result<Document> {
            self.documents
                .get(id)
                .cloned()
                .ok_or_else(|| Error::Fetch(format!("Document {} not found", id)))
        }
    }

    fn source() -> FixedSource {
        let mut post = Document::new("Mon article").with_id("doc1");
        post.add_element(StructuralElement::paragraph("Tags: rust\n"));
        post.add_element(StructuralElement::paragraph("Statut: publish\n"));
        post.add_element(StructuralElement::paragraph("Contenu de l'article.\n"));

        let untitled = Document::new("").with_id("doc2");
        FixedSource::with(vec![post, untitled])
    }

    #[test]
    fn test_import_publishes_record() {
        let mut importer = Importer::new(source(), MemorySink::new());
        let report = importer.import("doc1").unwrap();

        assert_eq!(report.document_id, "doc1");
        assert_eq!(report.title, "Mon article");
        assert_eq!(report.post.id, 1);
        assert_eq!(report.post.status, PostStatus::Publish);
        assert!(report.diagnostics.is_empty());

        let (_, sink) = importer.into_parts();
        let record = sink.last().unwrap();
        assert_eq!(record.tags, vec!["rust"]);
        assert_eq!(record.body, "Contenu de l'article.");
        assert_eq!(record.slug, "mon-article");
    }

    #[test]
    fn test_import_rejects_untitled_document() {
        let mut importer = Importer::new(source(), MemorySink::new());
        assert!(matches!(importer.import("doc2"), Err(Error::Parse(_))));
        assert!(importer.sink().is_empty());
    }

    #[test]
    fn test_import_missing_document() {
        let mut importer = Importer::new(source(), MemorySink::new());
        assert!(matches!(importer.import("nope"), Err(Error::Fetch(_))));
    }

    #[test]
    fn test_can_import() {
        let importer = Importer::new(source(), MemorySink::new());
        assert!(importer.can_import("doc1"));
        assert!(!importer.can_import("doc2"));
        assert!(!importer.can_import("missing"));
    }

    #[test]
    fn test_document_content_and_preview() {
        let importer = Importer::new(source(), MemorySink::new());

        let outcome = importer.document_content("doc1").unwrap();
        assert_eq!(outcome.record.status, PostStatus::Publish);

        let preview = importer.preview("doc1", 300).unwrap();
        assert_eq!(preview.tags, vec!["rust"]);
        assert_eq!(preview.word_count, 3);
    }

    #[test]
    fn test_list_respects_page_size() {
        let importer = Importer::new(source(), MemorySink::new());
        assert_eq!(importer.list(1).unwrap().len(), 1);
        assert_eq!(importer.list(10).unwrap().len(), 2);
    }

    #[test]
    fn test_document_id_from_url() {
        assert_eq!(
            document_id_from_url("https://docs.google.com/document/d/abc123/edit").as_deref(),
            Some("abc123")
        );
        assert_eq!(
            document_id_from_url("https://docs.google.com/document/d/abc123").as_deref(),
            Some("abc123")
        );
        assert_eq!(document_id_from_url("https://docs.google.com/document/d/"), None);
        assert_eq!(document_id_from_url("has space"), None);
        assert_eq!(document_id_from_url(""), None);
    }
}
