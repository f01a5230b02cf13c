//! Model bundle loading.
//!
//! The bundle document is JSON:
//!
//! ```json
//! {
//!   "feature_names": ["duration", "like_ratio"],
//!   "target_transformed": true,
//!   "scaler": { "mean": [600.0, 0.9], "scale": [300.0, 0.05] },
//!   "models": [
//!     { "name": "gradient_boosting", "kind": "linear", "coefficients": [0.4, 0.9], "intercept": 9.1 },
//!     { "name": "baseline", "kind": "constant", "value": 8.7 }
//!   ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ensemble::{ModelBundle, RegressorSpec, StandardScaler};
use crate::error::{PredictError, PredictResult};

/// Source of a [`ModelBundle`].
pub trait ModelLoader {
    fn load(&self) -> PredictResult<ModelBundle>;
}

/// One named model entry in a bundle document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedModelSpec {
    pub name: String,
    #[serde(flatten)]
    pub spec: RegressorSpec,
}

/// Serialized bundle layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleDocument {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub target_transformed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<StandardScaler>,
    #[serde(default)]
    pub models: Vec<NamedModelSpec>,
}

impl BundleDocument {
    /// Validate widths and build the in-memory bundle.
    pub fn into_bundle(self) -> PredictResult<ModelBundle> {
        let width = self.feature_names.len();
        let mut bundle = ModelBundle::new(self.feature_names, self.target_transformed);

        if let Some(scaler) = self.scaler {
            if scaler.mean.len() != scaler.scale.len() {
                return Err(PredictError::invalid_bundle(format!(
                    "scaler mean has {} entries but scale has {}",
                    scaler.mean.len(),
                    scaler.scale.len()
                )));
            }
            bundle = bundle.with_scaler(scaler)?;
        }

        for model in self.models {
            let regressor = model.spec.build(width)?;
            bundle = bundle.with_model(model.name, regressor);
        }

        Ok(bundle)
    }
}

/// Loads a bundle document from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonBundleLoader {
    path: PathBuf,
}

impl JsonBundleLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelLoader for JsonBundleLoader {
    fn load(&self) -> PredictResult<ModelBundle> {
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            PredictError::model_unavailable(format!(
                "cannot read bundle {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let document: BundleDocument = serde_json::from_str(&raw)?;
        let bundle = document.into_bundle()?;

        info!(
            path = %self.path.display(),
            models = ?bundle.model_names(),
            features = bundle.feature_names().len(),
            target_transformed = bundle.target_transformed(),
            "Loaded model bundle"
        );

        Ok(bundle)
    }
}
