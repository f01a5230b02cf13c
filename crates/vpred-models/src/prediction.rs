//! Prediction result models.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Qualitative label for a point prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Heuristic band around a point prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub level: ConfidenceLevel,
}

/// How closely the ensemble members agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AgreementLevel {
    High,
    Good,
    Mixed,
}

impl AgreementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgreementLevel::High => "high",
            AgreementLevel::Good => "good",
            AgreementLevel::Mixed => "mixed",
        }
    }
}

/// Model agreement derived from the coefficient of variation of estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ModelAgreement {
    /// stdev / mean of the estimates (0 when the mean is 0)
    pub cv: f64,
    pub level: AgreementLevel,
}

/// Where a prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    /// Fitted regressors from a loaded bundle
    #[default]
    Model,
    /// Heuristic demo estimate, used only when explicitly enabled
    Demo,
}

/// A single regressor's non-negative view estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ModelEstimate {
    pub model: String,
    pub views: f64,
}

impl ModelEstimate {
    pub fn new(model: impl Into<String>, views: f64) -> Self {
        Self {
            model: model.into(),
            views,
        }
    }
}

/// Ensemble prediction with its derived confidence band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PredictionResult {
    /// Per-model estimates in bundle order
    pub predictions: Vec<ModelEstimate>,

    /// Model whose estimate is reported as the point prediction
    pub best_model: String,

    /// Point prediction (views)
    pub best_prediction: f64,

    pub confidence_lower: f64,
    pub confidence_upper: f64,
    pub confidence_level: ConfidenceLevel,

    /// Present when two or more estimates exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreement: Option<ModelAgreement>,

    /// Point prediction spread over the days since upload
    pub views_per_day: f64,

    #[serde(default)]
    pub source: PredictionSource,
}

impl PredictionResult {
    /// Look up a model's estimate by name.
    pub fn estimate(&self, model: &str) -> Option<f64> {
        self.predictions
            .iter()
            .find(|e| e.model == model)
            .map(|e| e.views)
    }

    /// All estimate values in bundle order.
    pub fn values(&self) -> Vec<f64> {
        self.predictions.iter().map(|e| e.views).collect()
    }

    pub fn is_demo(&self) -> bool {
        self.source == PredictionSource::Demo
    }
}
