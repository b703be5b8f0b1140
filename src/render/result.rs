//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use super::text::{to_plain_text, word_count};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered Markdown
    pub content: String,

    /// Extraction statistics
    pub stats: ExtractionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, stats: ExtractionStats) -> Self {
        Self { content, stats }
    }
}

/// Statistics collected during content extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of paragraphs rendered (headings excluded)
    pub paragraph_count: u32,

    /// Number of headings rendered
    pub heading_count: u32,

    /// Number of tables rendered (nested tables included)
    pub table_count: u32,

    /// Number of inline objects replaced by the placeholder
    pub image_count: u32,

    /// Number of table-of-contents blocks skipped
    pub skipped_toc_count: u32,

    /// Words in the rendered text, Markdown syntax excluded
    pub word_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment image count.
    pub fn add_image(&mut self) {
        self.image_count += 1;
    }

    /// Increment skipped table-of-contents count.
    pub fn add_skipped_toc(&mut self) {
        self.skipped_toc_count += 1;
    }

    /// Add the words of rendered Markdown, ignoring its syntax.
    pub fn count_text(&mut self, markdown: &str) {
        self.word_count += word_count(&to_plain_text(markdown)) as u32;
    }
}
