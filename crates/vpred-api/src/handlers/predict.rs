//! Prediction handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::debug;
use vpred_models::{PredictionReport, VideoMetadataInput};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Predict views for one video.
///
/// Invalid metadata is a 400 naming the offending field. A missing or broken
/// model bundle is not an HTTP error: the report carries the computed
/// features and an explicit prediction error instead.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<VideoMetadataInput>, JsonRejection>,
) -> ApiResult<Json<PredictionReport>> {
    let Json(input) = payload?;
    debug!(title = %input.title, duration = input.duration, "Predict request");

    let report = state
        .predictor
        .predict_input(input)
        .map_err(|e| ApiError::from(e).redacted(state.config.is_production()))?;
    Ok(Json(report))
}
