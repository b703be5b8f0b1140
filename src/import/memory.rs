//! In-memory post sink for tests and dry runs.

use crate::error::Result;
use crate::post::ContentRecord;

use super::{PostSink, PublishedPost};

/// Collects published records in order, assigning ids from 1.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    posts: Vec<ContentRecord>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records published so far.
    pub fn posts(&self) -> &[ContentRecord] {
        &self.posts
    }

    /// The most recently published record.
    pub fn last(&self) -> Option<&ContentRecord> {
        self.posts.last()
    }

    /// Number of published records.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Check if nothing was published.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl PostSink for MemorySink {
    fn publish(&mut self, record: &ContentRecord) -> Result<PublishedPost> {
        self.posts.push(record.clone());
        Ok(PublishedPost {
            id: self.posts.len() as u64,
            link: None,
            status: record.status,
        })
    }
}
