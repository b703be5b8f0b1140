//! Structural (block-level) elements of a document body.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// One node in a document's content tree.
///
/// In the Docs JSON the kind is given by whichever field is set on the
/// element object: `paragraph`, `table`, `tableOfContents` or `sectionBreak`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStructuralElement", into = "RawStructuralElement")]
pub enum StructuralElement {
    /// A paragraph (headings are paragraphs with a heading style)
    Paragraph(Paragraph),

    /// A table whose cells nest further structural elements
    Table(Table),

    /// A generated table of contents
    TableOfContents(TableOfContents),

    /// Section breaks and any element kind not modeled here
    Unsupported,
}

impl StructuralElement {
    /// Create a plain paragraph element.
    pub fn paragraph(text: impl Into<String>) -> Self {
        StructuralElement::Paragraph(Paragraph::with_text(text))
    }

    /// Create a heading element.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        StructuralElement::Paragraph(Paragraph::heading(text, level))
    }
}

impl From<Paragraph> for StructuralElement {
    fn from(p: Paragraph) -> Self {
        StructuralElement::Paragraph(p)
    }
}

impl From<Table> for StructuralElement {
    fn from(t: Table) -> Self {
        StructuralElement::Table(t)
    }
}

/// A table of contents block. Its content is never rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableOfContents {
    /// Generated entries
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStructuralElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    paragraph: Option<Paragraph>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table: Option<Table>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    table_of_contents: Option<TableOfContents>,
}

impl From<RawStructuralElement> for StructuralElement {
    fn from(raw: RawStructuralElement) -> Self {
        if let Some(p) = raw.paragraph {
            StructuralElement::Paragraph(p)
        } else if let Some(t) = raw.table {
            StructuralElement::Table(t)
        } else if let Some(toc) = raw.table_of_contents {
            StructuralElement::TableOfContents(toc)
        } else {
            StructuralElement::Unsupported
        }
    }
}

impl From<StructuralElement> for RawStructuralElement {
    fn from(element: StructuralElement) -> Self {
        match element {
            StructuralElement::Paragraph(p) => Self {
                paragraph: Some(p),
                ..Default::default()
            },
            StructuralElement::Table(t) => Self {
                table: Some(t),
                ..Default::default()
            },
            StructuralElement::TableOfContents(toc) => Self {
                table_of_contents: Some(toc),
                ..Default::default()
            },
            StructuralElement::Unsupported => Self::default(),
        }
    }
}
