//! Error types for docpress.

use std::io;
use thiserror::Error;

/// Result type alias for docpress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while fetching, converting or publishing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The source document could not be retrieved.
    #[error("Failed to fetch document: {0}")]
    Fetch(String),

    /// The document structure could not be decoded.
    #[error("Document parsing error: {0}")]
    Parse(String),

    /// The post could not be created by the persistence backend.
    #[error("Failed to publish post: {0}")]
    Persist(String),

    /// Authentication with Google failed or is missing.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Required configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

#[cfg(any(feature = "google", feature = "wordpress"))]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Fetch("HTTP 404".to_string());
        assert_eq!(err.to_string(), "Failed to fetch document: HTTP 404");

        let err = Error::Config("CLIENT_GOOGLE_ID is not set".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: CLIENT_GOOGLE_ID is not set"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
