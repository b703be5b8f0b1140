//! Rendering module: document tree to Markdown, Markdown to plain text, JSON output.

mod json;
mod markdown;
mod options;
mod result;
pub mod text;

pub use json::{to_json, JsonFormat};
pub use markdown::{render_content, to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::{RenderOptions, IMAGE_PLACEHOLDER};
pub use result::{ExtractionStats, RenderResult};
