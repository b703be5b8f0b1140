//! Google Docs JSON parsing module.

mod docs_parser;
mod options;

pub use docs_parser::{DocsParser, ParsedDocument};
pub use options::{ErrorMode, ParseOptions};
