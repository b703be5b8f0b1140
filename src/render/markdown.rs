//! Markdown rendering for Google Docs content.

use crate::model::{
    Document, Paragraph, ParagraphElement, StructuralElement, Table, TableCell, TextRun, TextStyle,
};

use super::{ExtractionStats, RenderOptions, RenderResult};

/// Vertical tab: the character Docs uses for a soft line break (Shift+Enter).
const SOFT_LINE_BREAK: char = '\u{000B}';

/// Render a sequence of structural elements to Markdown with default options.
pub fn render_content(elements: &[StructuralElement]) -> String {
    MarkdownRenderer::new(RenderOptions::default()).render_elements(elements)
}

/// Convert a document body to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> String {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(doc)
}

/// Convert a document body to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> RenderResult {
    let mut options = options.clone();
    options.collect_stats = true;
    let renderer = MarkdownRenderer::new(options);
    renderer.render_with_stats(doc)
}

/// Markdown renderer.
///
/// Walks the structural tree depth-first. Each element renders to at most
/// one block; blocks are joined with a blank line.
pub struct MarkdownRenderer {
    options: RenderOptions,
    stats: ExtractionStats,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            stats: ExtractionStats::new(),
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &Document) -> String {
        self.render_elements(doc.elements())
    }

    /// Render a document to Markdown with extraction statistics.
    pub fn render_with_stats(mut self, doc: &Document) -> RenderResult {
        self.options.collect_stats = true;
        let content = self.render_elements(doc.elements());

        self.stats.count_text(&content);

        RenderResult::new(content, self.stats)
    }

    /// Render a sequence of elements. Also the entry point for table cells.
    pub fn render_elements(&mut self, elements: &[StructuralElement]) -> String {
        let blocks: Vec<String> = elements
            .iter()
            .filter_map(|element| self.render_element(element))
            .collect();

        blocks.join("\n\n").trim().to_string()
    }

    fn render_element(&mut self, element: &StructuralElement) -> Option<String> {
        match element {
            StructuralElement::Paragraph(p) => self.render_paragraph(p),
            StructuralElement::Table(t) => self.render_table(t),
            StructuralElement::TableOfContents(_) => {
                if self.options.collect_stats {
                    self.stats.add_skipped_toc();
                }
                None
            }
            StructuralElement::Unsupported => None,
        }
    }

    fn render_paragraph(&mut self, para: &Paragraph) -> Option<String> {
        if para.is_empty() {
            return None;
        }

        let mut text = String::new();
        for element in &para.elements {
            match element {
                ParagraphElement::TextRun(run) => {
                    text.push_str(&self.render_text_run(run));
                }
                ParagraphElement::InlineObject(_) => {
                    if self.options.collect_stats {
                        self.stats.add_image();
                    }
                    text.push_str(&self.options.image_placeholder);
                }
                ParagraphElement::Unsupported => {}
            }
        }

        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        // Handle headings
        if let Some(level) = para.heading_level() {
            if self.options.collect_stats {
                self.stats.add_heading();
            }
            let level = level.min(self.options.max_heading_level.clamp(1, 6));
            return Some(format!("{} {}", "#".repeat(level as usize), text));
        }

        if self.options.collect_stats {
            self.stats.add_paragraph();
        }
        Some(text.to_string())
    }

    fn render_text_run(&self, run: &TextRun) -> String {
        let break_marker = if self.options.preserve_line_breaks {
            "  \n"
        } else {
            " "
        };
        let text = run.content.replace(SOFT_LINE_BREAK, break_marker);
        apply_text_style(&text, &run.text_style)
    }

    fn render_table(&mut self, table: &Table) -> Option<String> {
        if table.is_empty() {
            return None;
        }
        let mut lines = Vec::with_capacity(table.row_count() + 1);

        // Rows without cells emit nothing, so the header is the first row
        // that has cells.
        for row in table.table_rows.iter().filter(|r| !r.table_cells.is_empty()) {
            let cells: Vec<String> = row
                .table_cells
                .iter()
                .map(|cell| self.render_cell(cell))
                .collect();
            lines.push(format!("| {} |", cells.join(" | ")));

            // Separator after the header row
            if lines.len() == 1 {
                lines.push(format!("|{}", " --- |".repeat(cells.len())));
            }
        }

        if self.options.collect_stats {
            self.stats.add_table();
        }
        Some(lines.join("\n"))
    }

    fn render_cell(&mut self, cell: &TableCell) -> String {
        let text = self.render_elements(&cell.content);
        escape_cell(&text)
    }
}

/// Wrap a run's text in emphasis and link syntax.
///
/// Nesting order is italic innermost, then bold, then link. Italic switches
/// to `_` inside bold so the markers never merge into `***`. Surrounding
/// whitespace stays outside the markers.
fn apply_text_style(text: &str, style: &TextStyle) -> String {
    let url = style.link_url();
    let core = text.trim();
    if core.is_empty() || (!style.bold && !style.italic && url.is_none()) {
        return text.to_string();
    }

    let start = text.len() - text.trim_start().len();
    let end = start + core.len();

    let mut result = core.to_string();
    if style.italic {
        result = if style.bold {
            format!("_{}_", result)
        } else {
            format!("*{}*", result)
        };
    }
    if style.bold {
        result = format!("**{}**", result);
    }
    if let Some(url) = url {
        result = format!("[{}]({})", result, url);
    }

    format!("{}{}{}", &text[..start], result, &text[end..])
}

/// Flatten cell text to a single line and escape column separators.
///
/// Goes further than trimming the cell's rendered content: a multi-line
/// cell or a literal `|` would otherwise break the row.
fn escape_cell(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('|', "\\|")
}
