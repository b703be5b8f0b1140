//! Source document model.
//!
//! These types mirror the Google Docs API v1 `documents.get` payload and the
//! Drive v3 `files.list` entries closely enough to deserialize them directly.
//! Unknown fields are ignored and missing collections default to empty, so a
//! partial payload still yields a usable tree.

mod document;
mod element;
mod paragraph;
mod table;

pub use document::{Body, Document, DocumentSummary};
pub use element::{StructuralElement, TableOfContents};
pub use paragraph::{
    InlineObjectElement, Link, Paragraph, ParagraphElement, ParagraphStyle, TextRun, TextStyle,
};
pub use table::{Table, TableCell, TableRow};
