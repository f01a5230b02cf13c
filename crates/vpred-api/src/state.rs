//! Application state.

use std::sync::Arc;

use vpred_engine::Predictor;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub predictor: Arc<Predictor>,
}

impl AppState {
    /// Create application state, loading the model bundle named in the config.
    pub fn new(config: ApiConfig) -> Self {
        let predictor = Predictor::from_config(config.predictor.clone());
        Self::with_predictor(config, predictor)
    }

    pub fn with_predictor(config: ApiConfig, predictor: Predictor) -> Self {
        Self {
            config,
            predictor: Arc::new(predictor),
        }
    }
}
