//! A named collection of fitted regressors sharing one scaler and schema.

use std::sync::Arc;

use crate::error::{PredictError, PredictResult};

use super::regressor::Regressor;
use super::scaler::StandardScaler;

/// Fitted models plus everything needed to feed them.
///
/// Constructed once by a loader and shared read-only for the process lifetime.
/// A bundle may be incomplete (no scaler, no models); prediction then fails
/// with [`PredictError::ModelUnavailable`] instead of fabricating numbers.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    feature_names: Vec<String>,
    target_transformed: bool,
    scaler: Option<StandardScaler>,
    models: Vec<(String, Arc<dyn Regressor>)>,
}

impl ModelBundle {
    /// Empty bundle over a feature ordering.
    pub fn new(feature_names: Vec<String>, target_transformed: bool) -> Self {
        Self {
            feature_names,
            target_transformed,
            scaler: None,
            models: Vec::new(),
        }
    }

    /// Attach the fitted scaler; its width must match the feature list.
    pub fn with_scaler(mut self, scaler: StandardScaler) -> PredictResult<Self> {
        if scaler.width() != self.feature_names.len() {
            return Err(PredictError::invalid_bundle(format!(
                "scaler width {} does not match {} feature names",
                scaler.width(),
                self.feature_names.len()
            )));
        }
        self.scaler = Some(scaler);
        Ok(self)
    }

    /// Add a named regressor. Later models with the same name replace earlier ones.
    pub fn with_model(mut self, name: impl Into<String>, model: Arc<dyn Regressor>) -> Self {
        let name = name.into();
        match self.models.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = model,
            None => self.models.push((name, model)),
        }
        self
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// True if regressors predict `log1p(views)`.
    pub fn target_transformed(&self) -> bool {
        self.target_transformed
    }

    pub fn scaler(&self) -> Option<&StandardScaler> {
        self.scaler.as_ref()
    }

    /// Model names in insertion order.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn model(&self, name: &str) -> Option<&Arc<dyn Regressor>> {
        self.models.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    pub fn models(&self) -> impl Iterator<Item = (&str, &Arc<dyn Regressor>)> {
        self.models.iter().map(|(n, m)| (n.as_str(), m))
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::regressor::ConstantRegressor;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{}", i)).collect()
    }

    #[test]
    fn test_scaler_width_must_match() {
        let bundle = ModelBundle::new(names(3), false);
        assert!(bundle.clone().with_scaler(StandardScaler::identity(2)).is_err());
        assert!(bundle.with_scaler(StandardScaler::identity(3)).is_ok());
    }

    #[test]
    fn test_models_keep_insertion_order_and_replace_by_name() {
        let bundle = ModelBundle::new(names(1), true)
            .with_model("random_forest", Arc::new(ConstantRegressor { value: 1.0 }))
            .with_model("gradient_boosting", Arc::new(ConstantRegressor { value: 2.0 }))
            .with_model("random_forest", Arc::new(ConstantRegressor { value: 3.0 }));

        assert_eq!(bundle.model_names(), vec!["random_forest", "gradient_boosting"]);
        assert_eq!(bundle.model("random_forest").unwrap().predict(&[]), 3.0);
        assert!(bundle.model("ridge").is_none());
        assert!(bundle.target_transformed());
    }
}
