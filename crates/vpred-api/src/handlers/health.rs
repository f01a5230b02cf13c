//! Health check handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub model_loaded: bool,
    pub demo_mode: bool,
    pub models: Vec<String>,
}

/// Readiness check endpoint (readiness probe).
///
/// Ready when a bundle is loaded, or when demo mode can stand in for one.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let predictor = &state.predictor;
    let model_loaded = predictor.has_bundle();
    let demo_mode = predictor.config().demo_mode;

    let response = ReadinessResponse {
        status: if model_loaded {
            "ready"
        } else if demo_mode {
            "demo"
        } else {
            "degraded"
        }
        .to_string(),
        model_loaded,
        demo_mode,
        models: predictor.model_names(),
    };

    if model_loaded || demo_mode {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
