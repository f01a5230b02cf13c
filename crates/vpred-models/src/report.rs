//! Full per-request prediction report.
//!
//! A report always carries the computed features, even when no model is
//! available, so callers can show partial results instead of failing outright.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::features::FeatureVector;
use crate::insight::InsightReport;
use crate::prediction::PredictionResult;
use crate::summary::VideoSummary;

/// Outcome of the prediction stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Predicted(PredictionResult),
    Unavailable { error: String },
}

impl PredictionOutcome {
    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            PredictionOutcome::Predicted(result) => Some(result),
            PredictionOutcome::Unavailable { .. } => None,
        }
    }
}

/// Everything computed for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictionReport {
    /// Request identifier for log correlation
    pub request_id: String,

    /// Feature vector aligned to the model schema
    pub features: FeatureVector,

    /// Schema reconciliation warnings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    pub prediction: PredictionOutcome,

    /// Present only when a prediction exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<InsightReport>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<VideoSummary>,
}

impl PredictionReport {
    pub fn is_predicted(&self) -> bool {
        self.prediction.result().is_some()
    }
}
