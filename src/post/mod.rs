//! Post content: the record, metadata directives, excerpts and slugs.

mod directives;
mod excerpt;
mod record;
mod slug;

pub use directives::{extract_metadata, extract_metadata_with, DirectiveKind};
pub use excerpt::{generate_excerpt, DEFAULT_EXCERPT_LENGTH};
pub use record::{ContentRecord, PostStatus};
pub use slug::slugify;
