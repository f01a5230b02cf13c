//! Predictor configuration.

/// Model preferred for the point prediction when present in the bundle.
pub const DEFAULT_CANONICAL_MODEL: &str = "gradient_boosting";

/// Predictor configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictorConfig {
    /// Path to the JSON model bundle
    pub bundle_path: Option<String>,
    /// Preferred model for the point prediction
    pub canonical_model: String,
    /// Models that must be present; empty means every model in the bundle
    pub required_models: Vec<String>,
    /// Allow labelled heuristic estimates when no bundle is available
    pub demo_mode: bool,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            bundle_path: None,
            canonical_model: DEFAULT_CANONICAL_MODEL.to_string(),
            required_models: Vec::new(),
            demo_mode: false,
        }
    }
}

impl PredictorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            bundle_path: std::env::var("VPRED_BUNDLE_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            canonical_model: std::env::var("VPRED_CANONICAL_MODEL")
                .unwrap_or_else(|_| DEFAULT_CANONICAL_MODEL.to_string()),
            required_models: std::env::var("VPRED_MODELS")
                .map(|s| parse_list(&s))
                .unwrap_or_default(),
            demo_mode: std::env::var("VPRED_DEMO_MODE")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
