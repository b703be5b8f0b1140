//! The content record handed to the persistence backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Saved but not visible
    #[default]
    Draft,
    /// Publicly visible
    Publish,
    /// Visible to logged-in editors only
    Private,
}

impl PostStatus {
    /// The WordPress status keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Publish => "publish",
            PostStatus::Private => "private",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(PostStatus::Draft),
            "publish" => Ok(PostStatus::Publish),
            "private" => Ok(PostStatus::Private),
            other => Err(Error::Other(format!("Unknown post status: {}", other))),
        }
    }
}

/// Post content and metadata extracted from one document.
///
/// Created fresh for every conversion and never reused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Post title (the document title)
    pub title: String,

    /// Markdown body with directive lines removed
    pub body: String,

    /// Category names, in directive order
    #[serde(default)]
    pub categories: Vec<String>,

    /// Tag names, in directive order
    #[serde(default)]
    pub tags: Vec<String>,

    /// URL slug
    #[serde(default)]
    pub slug: String,

    /// Author login or email
    #[serde(default)]
    pub author: String,

    /// SEO meta description
    #[serde(default)]
    pub meta_description: String,

    /// SEO focus keyword
    #[serde(default)]
    pub target_keyword: String,

    /// Post excerpt
    #[serde(default)]
    pub excerpt: String,

    /// Publication status
    #[serde(default)]
    pub status: PostStatus,
}

impl ContentRecord {
    /// Create an empty record with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Create a record with a title and body.
    pub fn with_body(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let record = ContentRecord::new("Hello");
        assert_eq!(record.title, "Hello");
        assert!(record.body.is_empty());
        assert!(record.categories.is_empty());
        assert_eq!(record.status, PostStatus::Draft);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("PUBLISH".parse::<PostStatus>().unwrap(), PostStatus::Publish);
        assert_eq!(" private ".parse::<PostStatus>().unwrap(), PostStatus::Private);
        assert!("foo".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_serialize_status_lowercase() {
        let mut record = ContentRecord::new("T");
        record.status = PostStatus::Publish;
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "publish");
        assert_eq!(json["meta_description"], "");
    }
}
