//! Document-level types.

use super::StructuralElement;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Google Docs document as returned by `documents.get`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document id
    #[serde(default)]
    pub document_id: String,

    /// Document title
    #[serde(default)]
    pub title: String,

    /// Main body (absent for some tab-only payloads)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

impl Document {
    /// Create a new empty document with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            document_id: String::new(),
            title: title.into(),
            body: None,
        }
    }

    /// Set the document id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = id.into();
        self
    }

    /// Append a structural element to the body.
    pub fn add_element(&mut self, element: impl Into<StructuralElement>) {
        self.body
            .get_or_insert_with(Body::default)
            .content
            .push(element.into());
    }

    /// Body elements in order. Empty when the body is missing.
    pub fn elements(&self) -> &[StructuralElement] {
        self.body.as_ref().map(|b| b.content.as_slice()).unwrap_or(&[])
    }

    /// Check if the document has any body content.
    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }
}

/// The document body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Structural elements in document order
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// A Google Docs file as listed by Drive `files.list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    /// Drive file id (same as the document id)
    pub id: String,

    /// File name
    #[serde(default)]
    pub name: String,

    /// Last modification time
    #[serde(default)]
    pub modified_time: Option<DateTime<Utc>>,

    /// Creation time
    #[serde(default)]
    pub created_time: Option<DateTime<Utc>>,

    /// Link to open the document in a browser
    #[serde(default, rename = "webViewLink")]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_elements() {
        let mut doc = Document::new("Test");
        assert!(doc.is_empty());

        doc.add_element(StructuralElement::paragraph("Hello"));
        assert_eq!(doc.elements().len(), 1);
    }

    #[test]
    fn test_deserialize_document() {
        let json = r#"{
            "documentId": "1abc",
            "title": "Mon article",
            "revisionId": "xyz",
            "body": {"content": [{"sectionBreak": {}}, {"paragraph": {"elements": []}}]}
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.document_id, "1abc");
        assert_eq!(doc.title, "Mon article");
        assert_eq!(doc.elements().len(), 2);
    }

    #[test]
    fn test_deserialize_document_without_body() {
        let doc: Document = serde_json::from_str(r#"{"title": "Empty"}"#).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_deserialize_summary() {
        let json = r#"{
            "id": "1abc",
            "name": "Draft",
            "modifiedTime": "2024-03-01T10:00:00.000Z",
            "createdTime": "2024-02-01T09:30:00.000Z",
            "webViewLink": "https://docs.google.com/document/d/1abc/edit"
        }"#;
        let summary: DocumentSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.name, "Draft");
        assert!(summary.modified_time.is_some());
        assert_eq!(
            summary.link.as_deref(),
            Some("https://docs.google.com/document/d/1abc/edit")
        );
    }
}
