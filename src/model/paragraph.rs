//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of text content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Inline elements in document order
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,

    /// Paragraph style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paragraph_style: Option<ParagraphStyle>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a heading paragraph (`HEADING_<level>` named style).
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        Self::with_text(text).with_named_style(format!("HEADING_{}", level))
    }

    /// Set the named style type (e.g. `NORMAL_TEXT`, `TITLE`, `HEADING_2`).
    pub fn with_named_style(mut self, style: impl Into<String>) -> Self {
        self.paragraph_style = Some(ParagraphStyle {
            named_style_type: Some(style.into()),
        });
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.elements.push(ParagraphElement::TextRun(TextRun::new(text)));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.elements.push(ParagraphElement::TextRun(run));
    }

    /// Add an inline object reference (image, drawing).
    pub fn add_inline_object(&mut self, id: impl Into<String>) {
        self.elements.push(ParagraphElement::InlineObject(InlineObjectElement {
            inline_object_id: id.into(),
        }));
    }

    /// The named style type, if any.
    pub fn named_style_type(&self) -> Option<&str> {
        self.paragraph_style
            .as_ref()
            .and_then(|s| s.named_style_type.as_deref())
    }

    /// Get the heading level (1-6) or None.
    ///
    /// Any named style containing `HEADING` is a heading. The level is the
    /// trailing digit of the style name; a missing digit counts as 0. The
    /// result is clamped to 1..=6.
    pub fn heading_level(&self) -> Option<u8> {
        let style = self.named_style_type()?;
        if !style.contains("HEADING") {
            return None;
        }
        let level = style
            .chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0) as u8;
        Some(level.clamp(1, 6))
    }

    /// Get unstyled text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .filter_map(|e| match e {
                ParagraphElement::TextRun(run) => Some(run.content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Check if the paragraph has no visible content.
    pub fn is_empty(&self) -> bool {
        let has_object = self
            .elements
            .iter()
            .any(|e| matches!(e, ParagraphElement::InlineObject(_)));
        !has_object && self.plain_text().trim().is_empty()
    }
}

/// Paragraph-level style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    /// Named style type such as `HEADING_1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub named_style_type: Option<String>,
}

/// Inline content within a paragraph.
///
/// Google Docs encodes the variant as whichever field is present on the
/// element object (`textRun`, `inlineObjectElement`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawParagraphElement", into = "RawParagraphElement")]
pub enum ParagraphElement {
    /// A run of text with uniform styling
    TextRun(TextRun),

    /// An embedded object (image, drawing)
    InlineObject(InlineObjectElement),

    /// Page breaks, rules, footnote references, auto text
    Unsupported,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParagraphElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text_run: Option<TextRun>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_object_element: Option<InlineObjectElement>,
}

impl From<RawParagraphElement> for ParagraphElement {
    fn from(raw: RawParagraphElement) -> Self {
        if let Some(run) = raw.text_run {
            ParagraphElement::TextRun(run)
        } else if let Some(object) = raw.inline_object_element {
            ParagraphElement::InlineObject(object)
        } else {
            ParagraphElement::Unsupported
        }
    }
}

impl From<ParagraphElement> for RawParagraphElement {
    fn from(element: ParagraphElement) -> Self {
        match element {
            ParagraphElement::TextRun(run) => Self {
                text_run: Some(run),
                ..Default::default()
            },
            ParagraphElement::InlineObject(object) => Self {
                inline_object_element: Some(object),
                ..Default::default()
            },
            ParagraphElement::Unsupported => Self::default(),
        }
    }
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// The text content (Docs runs usually end with `\n`)
    #[serde(default)]
    pub content: String,

    /// Text styling
    #[serde(default)]
    pub text_style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            text_style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            text_style: TextStyle {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            text_style: TextStyle {
                italic: true,
                ..Default::default()
            },
        }
    }

    /// Create a hyperlinked text run.
    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            content: text.into(),
            text_style: TextStyle {
                link: Some(Link::new(url)),
                ..Default::default()
            },
        }
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Text styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Bold text
    #[serde(default)]
    pub bold: bool,

    /// Italic text
    #[serde(default)]
    pub italic: bool,

    /// Hyperlink target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl TextStyle {
    /// External URL of the link, if any. Internal heading/bookmark links have none.
    pub fn link_url(&self) -> Option<&str> {
        self.link
            .as_ref()
            .and_then(|l| l.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}

/// A hyperlink.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// External URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Link {
    /// Create a link to an external URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// Reference to an object in the document's `inlineObjects` map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineObjectElement {
    /// Object id
    #[serde(default)]
    pub inline_object_id: String,
}
