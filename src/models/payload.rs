//! JSON payloads for the HTTP surface.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Message returned on a successful deduplication.
pub const SUCCESS_MESSAGE: &str = "Duplicates removed successfully";

/// Error returned when `file_contents` is absent or `null`.
pub const MISSING_FILE_CONTENTS: &str = "No file contents provided";

/// Body of `POST /remove_duplicates`.
///
/// Unknown fields are ignored. An absent `file_contents` and an explicit
/// `null` both deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RemoveDuplicatesRequest {
    /// Raw CSV text, header row first.
    #[serde(default)]
    pub file_contents: Option<String>,
}

impl RemoveDuplicatesRequest {
    /// Creates a request carrying CSV text.
    #[must_use]
    pub fn new(file_contents: impl Into<String>) -> Self {
        Self {
            file_contents: Some(file_contents.into()),
        }
    }

    /// Extracts the CSV text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`] when `file_contents` was not supplied.
    pub fn into_contents(self) -> Result<String> {
        self.file_contents
            .ok_or_else(|| Error::MissingInput(MISSING_FILE_CONTENTS.to_string()))
    }
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveDuplicatesResponse {
    /// Fixed confirmation message.
    pub message: String,
    /// The deduplicated CSV text.
    pub cleaned_csv: String,
}

impl RemoveDuplicatesResponse {
    /// Wraps cleaned CSV in a success response.
    #[must_use]
    pub fn new(cleaned_csv: impl Into<String>) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            cleaned_csv: cleaned_csv.into(),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl ErrorResponse {
    /// Creates an error response.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_with_contents() {
        let req: RemoveDuplicatesRequest =
            serde_json::from_value(json!({"file_contents": "a,b\n1,2\n"})).unwrap();
        assert_eq!(req.file_contents.as_deref(), Some("a,b\n1,2\n"));
    }

    #[test]
    fn test_request_missing_and_null_are_none() {
        let missing: RemoveDuplicatesRequest = serde_json::from_value(json!({})).unwrap();
        let null: RemoveDuplicatesRequest =
            serde_json::from_value(json!({"file_contents": null})).unwrap();
        assert_eq!(missing.file_contents, None);
        assert_eq!(null.file_contents, None);
    }

    #[test]
    fn test_into_contents() {
        let contents = RemoveDuplicatesRequest::new("a\n1\n").into_contents().unwrap();
        assert_eq!(contents, "a\n1\n");

        let err = RemoveDuplicatesRequest::default().into_contents().unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
        assert_eq!(err.to_string(), MISSING_FILE_CONTENTS);
    }

    #[test]
    fn test_request_ignores_unknown_fields() {
        let req: RemoveDuplicatesRequest =
            serde_json::from_value(json!({"file_contents": "a\n", "filename": "x.csv"})).unwrap();
        assert_eq!(req.file_contents.as_deref(), Some("a\n"));
    }

    #[test]
    fn test_request_rejects_non_string_contents() {
        let result: std::result::Result<RemoveDuplicatesRequest, _> =
            serde_json::from_value(json!({"file_contents": 42}));
        assert!(result.is_err());
    }

    #[test]
    fn test_response_shape() {
        let value = serde_json::to_value(RemoveDuplicatesResponse::new("a\n")).unwrap();
        assert_eq!(
            value,
            json!({"message": "Duplicates removed successfully", "cleaned_csv": "a\n"})
        );

        let value = serde_json::to_value(ErrorResponse::new(MISSING_FILE_CONTENTS)).unwrap();
        assert_eq!(value, json!({"error": "No file contents provided"}));
    }
}
