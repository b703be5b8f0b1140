//! JSON rendering for content records and previews.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value (record, preview, document) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::ContentRecord;

    #[test]
    fn test_to_json_pretty() {
        let record = ContentRecord::new("Test");
        let json = to_json(&record, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"title\""));
        assert!(json.contains("\"status\": \"draft\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact() {
        let record = ContentRecord::new("Test");
        let json = to_json(&record, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }
}
