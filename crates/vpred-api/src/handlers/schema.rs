//! Feature schema handler.

use axum::extract::State;
use axum::Json;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::Serialize;
use vpred_models::{FeatureName, VideoMetadataInput};

use crate::state::AppState;

/// Feature and model schema in use.
#[derive(Serialize)]
pub struct SchemaResponse {
    /// Feature order predictions are made against
    pub feature_names: Vec<String>,
    /// The features the extractor computes
    pub canonical_features: Vec<String>,
    pub models: Vec<String>,
    pub canonical_model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_transformed: Option<bool>,
    pub demo_mode: bool,
    /// JSON schema of the predict request body
    pub input_schema: RootSchema,
}

pub async fn get_schema(State(state): State<AppState>) -> Json<SchemaResponse> {
    let predictor = &state.predictor;

    Json(SchemaResponse {
        feature_names: predictor.feature_names(),
        canonical_features: FeatureName::canonical_names(),
        models: predictor.model_names(),
        canonical_model: predictor.config().canonical_model.clone(),
        target_transformed: predictor.bundle().map(|b| b.target_transformed()),
        demo_mode: predictor.config().demo_mode,
        input_schema: schema_for!(VideoMetadataInput),
    })
}
