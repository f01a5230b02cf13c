//! API error types.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use vpred_engine::PredictError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid field '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Replace internal error details with a generic message in production.
    pub fn redacted(self, production: bool) -> Self {
        match self {
            ApiError::Internal(msg) if production => {
                error!(error = %msg, "Internal error");
                Self::internal("An internal error occurred")
            }
            other => other,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Validation { .. } => "validation_error",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::MalformedMetadata { field, reason } => Self::validation(field, reason),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if let JsonRejection::JsonDataError(err) = &rejection {
            let message = std::error::Error::source(err)
                .map(|source| source.to_string())
                .unwrap_or_else(|| err.body_text());
            if let Some((field, reason)) = field_from_message(&message) {
                return Self::validation(field, reason);
            }
        }
        Self::bad_request(rejection.body_text())
    }
}

/// Split a deserialization message into the offending field and the reason.
///
/// Handles `path: reason` (type errors inside a field) and
/// ``missing field `name` `` (required field absent).
fn field_from_message(message: &str) -> Option<(String, String)> {
    if let Some(rest) = message.strip_prefix("missing field `") {
        let (field, _) = rest.split_once('`')?;
        return Some((field.to_string(), "field is required".to_string()));
    }

    let (path, reason) = message.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| (path.to_string(), reason.to_string()))
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let detail = self.to_string();

        let field = match &self {
            ApiError::Validation { field, .. } => Some(field.clone()),
            _ => None,
        };

        let body = ErrorResponse {
            detail,
            code: self.code(),
            field,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_metadata_maps_to_validation() {
        let err: ApiError = PredictError::malformed("duration", "value out of range").into();
        assert!(matches!(err, ApiError::Validation { ref field, .. } if field == "duration"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bundle_errors_are_internal() {
        let err: ApiError = PredictError::invalid_bundle("width").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "internal_error");
    }

    #[test]
    fn test_internal_detail_hidden_in_production() {
        let err = ApiError::internal("bundle at /srv/models.json is corrupt");
        assert!(err.to_string().contains("/srv/models.json"));

        let err = ApiError::internal("bundle at /srv/models.json is corrupt").redacted(true);
        assert_eq!(err.to_string(), "Internal error: An internal error occurred");

        let err = ApiError::validation("duration", "negative").redacted(true);
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn test_field_from_message() {
        assert_eq!(
            field_from_message("duration: invalid type: string \"long\", expected i64 at line 1 column 20"),
            Some((
                "duration".to_string(),
                "invalid type: string \"long\", expected i64 at line 1 column 20".to_string()
            ))
        );
        assert_eq!(
            field_from_message("missing field `title` at line 1 column 30"),
            Some(("title".to_string(), "field is required".to_string()))
        );
        assert_eq!(field_from_message("expected value at line 1 column 1"), None);
        assert_eq!(field_from_message("invalid type: map, expected a string"), None);
    }
}
