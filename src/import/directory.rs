//! A document source backed by a directory of `documents.get` JSON exports.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Document, DocumentSummary};
use crate::parser::{DocsParser, ParseOptions, ParsedDocument};

use super::DocumentSource;

/// Reads `<dir>/<id>.json` files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    options: ParseOptions,
}

impl DirectorySource {
    /// Create a source over a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            options: ParseOptions::default(),
        }
    }

    /// Set JSON decoding options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(Error::Fetch(format!("Invalid document id: {:?}", id)));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }

    fn summarize(path: &Path, id: String) -> DocumentSummary {
        let modified_time = fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Utc>::from);

        let name = fs::read(path)
            .ok()
            .and_then(|data| serde_json::from_slice::<Value>(&data).ok())
            .and_then(|value| value.get("title").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| {
                log::warn!("No readable title in {}", path.display());
                id.clone()
            });

        DocumentSummary {
            id,
            name,
            modified_time,
            created_time: None,
            link: None,
        }
    }
}

impl DocumentSource for DirectorySource {
    fn list_documents(&self, page_size: usize) -> Result<Vec<DocumentSummary>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            Error::Fetch(format!("Cannot read {}: {}", self.dir.display(), e))
        })?;

        let mut summaries = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            summaries.push(Self::summarize(&path, id.to_string()));
        }

        summaries.sort_by(|a, b| b.modified_time.cmp(&a.modified_time).then(a.id.cmp(&b.id)));
        summaries.truncate(page_size);

        log::debug!("Listed {} documents in {}", summaries.len(), self.dir.display());
        Ok(summaries)
    }

    fn get_document(&self, id: &str) -> Result<Document> {
        Ok(self.fetch_document(id)?.document)
    }

    fn fetch_document(&self, id: &str) -> Result<ParsedDocument> {
        let path = self.path_for(id)?;
        if !path.is_file() {
            return Err(Error::Fetch(format!(
                "Document {} not found in {}",
                id,
                self.dir.display()
            )));
        }

        let mut parsed = DocsParser::open_with_options(&path, self.options.clone())?.parse()?;
        for diagnostic in &parsed.diagnostics {
            log::warn!("{}: {}", path.display(), diagnostic);
        }

        if parsed.document.document_id.is_empty() {
            parsed.document.document_id = id.to_string();
        }
        Ok(parsed)
    }
}
