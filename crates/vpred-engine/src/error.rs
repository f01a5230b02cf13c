//! Engine error types.

use thiserror::Error;
use vpred_models::MetadataError;

/// Result type for engine operations.
pub type PredictResult<T> = Result<T, PredictError>;

/// Errors that can occur while extracting features or predicting.
///
/// Schema mismatches are deliberately absent: they are recovered locally and
/// surfaced as warnings on the report.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Malformed metadata field '{field}': {reason}")]
    MalformedMetadata { field: String, reason: String },

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Invalid model bundle: {0}")]
    InvalidBundle(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PredictError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedMetadata {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn model_unavailable(msg: impl Into<String>) -> Self {
        Self::ModelUnavailable(msg.into())
    }

    pub fn invalid_bundle(msg: impl Into<String>) -> Self {
        Self::InvalidBundle(msg.into())
    }

    /// True for failures of the prediction stage (as opposed to input errors).
    ///
    /// Callers use this to keep showing features when only the model is missing.
    pub fn is_prediction_failure(&self) -> bool {
        matches!(
            self,
            PredictError::ModelUnavailable(_) | PredictError::InvalidBundle(_)
        )
    }

    /// Short snake_case label, used for metric labels and error codes.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::MalformedMetadata { .. } => "malformed_metadata",
            PredictError::ModelUnavailable(_) => "model_unavailable",
            PredictError::InvalidBundle(_) => "invalid_bundle",
            PredictError::Json(_) => "json",
        }
    }

    /// Offending field for metadata errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            PredictError::MalformedMetadata { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<MetadataError> for PredictError {
    fn from(err: MetadataError) -> Self {
        Self::MalformedMetadata {
            field: err.field,
            reason: err.reason,
        }
    }
}
