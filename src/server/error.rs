//! Mapping from crate errors to HTTP error responses.

use crate::Error;
use crate::models::ErrorResponse;
use axum::Json;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error returned by HTTP handlers, rendered as `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Message placed in the `error` field.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::MissingInput(message) => Self::new(StatusCode::BAD_REQUEST, message),
            Error::InvalidInput(cause) => Self::new(
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {cause}"),
            ),
            Error::MalformedCsv {
                line: Some(line),
                cause,
            } => Self::new(
                StatusCode::BAD_REQUEST,
                format!("Malformed CSV at line {line}: {cause}"),
            ),
            Error::MalformedCsv { line: None, cause } => {
                Self::new(StatusCode::BAD_REQUEST, format!("Malformed CSV: {cause}"))
            },
            err @ Error::OperationFailed { .. } => {
                tracing::error!(error = %err, "Request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            },
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        tracing::warn!(error = %rejection, "Rejected request body");
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MISSING_FILE_CONTENTS;
    use test_case::test_case;

    #[test]
    fn test_missing_input_is_verbatim_400() {
        let api = ApiError::from(Error::MissingInput(MISSING_FILE_CONTENTS.to_string()));
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), "No file contents provided");
    }

    #[test_case(Some(4), "Malformed CSV at line 4: bad" ; "with line")]
    #[test_case(None, "Malformed CSV: bad" ; "without line")]
    fn test_malformed_csv_is_400(line: Option<u64>, expected: &str) {
        let api = ApiError::from(Error::MalformedCsv {
            line,
            cause: "bad".to_string(),
        });
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), expected);
    }

    #[test]
    fn test_invalid_input_is_400() {
        let api = ApiError::from(Error::InvalidInput("expected an object".to_string()));
        assert_eq!(api.status(), StatusCode::BAD_REQUEST);
        assert_eq!(api.message(), "Invalid request body: expected an object");
    }

    #[test]
    fn test_operation_failed_hides_cause() {
        let api = ApiError::from(Error::OperationFailed {
            operation: "write_csv_record".to_string(),
            cause: "disk on fire".to_string(),
        });
        assert_eq!(api.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message(), "Internal server error");
    }
}
