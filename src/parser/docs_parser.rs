//! Google Docs `documents.get` JSON parser.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Body, Document, StructuralElement};

use super::options::{ErrorMode, ParseOptions};

/// A decoded document plus whatever was skipped while decoding it.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    /// The decoded document
    pub document: Document,

    /// One message per skipped or defaulted piece of input
    pub diagnostics: Vec<String>,
}

impl ParsedDocument {
    /// Check whether the input decoded without any loss.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Google Docs JSON parser.
///
/// In strict mode any shape mismatch is an [`Error::Parse`]. In lenient mode
/// body elements are decoded one by one and those that fail are skipped and
/// reported as diagnostics.
pub struct DocsParser {
    value: Value,
    options: ParseOptions,
}

impl DocsParser {
    /// Parse a JSON document from a string.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_with_options(json, ParseOptions::default())
    }

    /// Parse a JSON document from a string with custom options.
    pub fn from_json_with_options(json: &str, options: ParseOptions) -> Result<Self> {
        let value = serde_json::from_str(json)
            .map_err(|e| Error::Parse(format!("Invalid document JSON: {}", e)))?;
        Ok(Self { value, options })
    }

    /// Parse a JSON document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a JSON document from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let value = serde_json::from_slice(data)
            .map_err(|e| Error::Parse(format!("Invalid document JSON: {}", e)))?;
        Ok(Self { value, options })
    }

    /// Open a JSON export of a document.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a JSON export of a document with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse a JSON document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse a JSON document from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Decode the document.
    pub fn parse(&self) -> Result<ParsedDocument> {
        match self.options.error_mode {
            ErrorMode::Strict => {
                let document = Document::deserialize(&self.value)
                    .map_err(|e| Error::Parse(format!("Invalid document: {}", e)))?;
                Ok(ParsedDocument {
                    document,
                    diagnostics: Vec::new(),
                })
            }
            ErrorMode::Lenient => Ok(self.parse_lenient()),
        }
    }

    fn parse_lenient(&self) -> ParsedDocument {
        let mut parsed = ParsedDocument::default();

        let Some(object) = self.value.as_object() else {
            note(&mut parsed, "Document JSON is not an object".to_string());
            return parsed;
        };

        if let Some(id) = object.get("documentId").and_then(Value::as_str) {
            parsed.document.document_id = id.to_string();
        }

        match object.get("title") {
            Some(Value::String(title)) => parsed.document.title = title.clone(),
            Some(_) => note(&mut parsed, "Document title is not a string".to_string()),
            None => note(&mut parsed, "Document has no title".to_string()),
        }

        let Some(body) = object.get("body") else {
            return parsed;
        };

        let content = match body.get("content") {
            Some(Value::Array(items)) => items,
            Some(_) => {
                note(&mut parsed, "Body content is not an array".to_string());
                return parsed;
            }
            None => {
                parsed.document.body = Some(Body::default());
                return parsed;
            }
        };

        let mut elements = Vec::with_capacity(content.len());
        for (index, item) in content.iter().enumerate() {
            match StructuralElement::deserialize(item) {
                Ok(element) => elements.push(element),
                Err(e) => note(&mut parsed, format!("Skipped element {}: {}", index, e)),
            }
        }

        parsed.document.body = Some(Body { content: elements });
        parsed
    }
}

fn note(parsed: &mut ParsedDocument, message: String) {
    log::warn!("{}", message);
    parsed.diagnostics.push(message);
}
