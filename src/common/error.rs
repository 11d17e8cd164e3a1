use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::common::types::ErrorResponse;

pub const MISSING_FIELDS_ERROR: &str = "Missing file or signature";
pub const NOT_FOUND_ERROR: &str = "Not found";
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Everything that can stop a verification from producing a verdict.
///
/// The `Display` text is for server logs only. Clients see [`VerifyError::body`].
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("request is missing file or signature")]
    MalformedRequest,
    #[error("file is not valid base64: {0}")]
    DecodeFailure(#[from] base64::DecodeError),
    #[error("request body is not valid JSON: {0}")]
    InvalidBody(#[from] serde_json::Error),
    #[error("field {0} is not a string")]
    FieldType(&'static str),
    #[error("failed to read request body: {0}")]
    BodyRead(String),
    #[error("hmac failure: {0}")]
    Crypto(String),
    #[error("no route")]
    NotFound,
}

impl VerifyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            VerifyError::MalformedRequest => StatusCode::BAD_REQUEST,
            VerifyError::NotFound => StatusCode::NOT_FOUND,
            VerifyError::DecodeFailure(_)
            | VerifyError::InvalidBody(_)
            | VerifyError::FieldType(_)
            | VerifyError::BodyRead(_)
            | VerifyError::Crypto(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label safe to put in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyError::MalformedRequest => "malformed_request",
            VerifyError::DecodeFailure(_) => "decode_failure",
            VerifyError::InvalidBody(_) => "invalid_body",
            VerifyError::FieldType(_) => "field_type",
            VerifyError::BodyRead(_) => "body_read",
            VerifyError::Crypto(_) => "crypto",
            VerifyError::NotFound => "not_found",
        }
    }

    /// Client-facing body. Never carries internal detail.
    pub fn body(&self) -> ErrorResponse {
        match self {
            VerifyError::MalformedRequest => ErrorResponse {
                valid: Some(false),
                error: MISSING_FIELDS_ERROR.to_string(),
            },
            VerifyError::NotFound => ErrorResponse {
                valid: None,
                error: NOT_FOUND_ERROR.to_string(),
            },
            VerifyError::DecodeFailure(_)
            | VerifyError::InvalidBody(_)
            | VerifyError::FieldType(_)
            | VerifyError::BodyRead(_)
            | VerifyError::Crypto(_) => ErrorResponse {
                valid: Some(false),
                error: INTERNAL_ERROR.to_string(),
            },
        }
    }
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

    #[test]
    fn test_status_mapping() {
        assert_eq!(VerifyError::MalformedRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(VerifyError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            VerifyError::Crypto("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_decode_failure_hides_detail() {
        let err: VerifyError = BASE64.decode("%%%").unwrap_err().into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = err.body();
        assert_eq!(body.valid, Some(false));
        assert_eq!(body.error, INTERNAL_ERROR);
        assert!(err.to_string().contains("base64"));
    }

    #[test]
    fn test_malformed_body() {
        let body = VerifyError::MalformedRequest.body();
        assert_eq!(body.valid, Some(false));
        assert_eq!(body.error, MISSING_FIELDS_ERROR);
    }
}
