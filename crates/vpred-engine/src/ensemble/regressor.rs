//! Regressor abstraction and the built-in model kinds.

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{PredictError, PredictResult};

/// A pre-fitted regressor over scaled features.
///
/// Implementations must be side-effect free on inference so one loaded bundle
/// can serve concurrent requests.
#[cfg_attr(test, mockall::automock)]
pub trait Regressor: Send + Sync + Debug {
    /// Raw estimate for one scaled feature row (log1p scale if the bundle is
    /// target-transformed).
    fn predict(&self, features: &[f64]) -> f64;
}

/// `intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
}

impl Regressor for LinearRegressor {
    fn predict(&self, features: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Always returns the same raw value (a fitted mean baseline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantRegressor {
    pub value: f64,
}

impl Regressor for ConstantRegressor {
    fn predict(&self, _features: &[f64]) -> f64 {
        self.value
    }
}

/// Serialized regressor definition as stored in a bundle document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorSpec {
    Linear(LinearRegressor),
    Constant(ConstantRegressor),
}

impl RegressorSpec {
    /// Build the regressor, checking it against the bundle's feature width.
    pub fn build(self, width: usize) -> PredictResult<Arc<dyn Regressor>> {
        match self {
            RegressorSpec::Linear(linear) => {
                if linear.coefficients.len() != width {
                    return Err(PredictError::invalid_bundle(format!(
                        "linear model has {} coefficients for {} features",
                        linear.coefficients.len(),
                        width
                    )));
                }
                Ok(Arc::new(linear))
            }
            RegressorSpec::Constant(constant) => Ok(Arc::new(constant)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_predict() {
        let model = LinearRegressor {
            coefficients: vec![2.0, -1.0],
            intercept: 0.5,
        };
        assert_eq!(model.predict(&[3.0, 4.0]), 2.5);
    }

    #[test]
    fn test_spec_deserializes_by_kind() {
        let spec: RegressorSpec =
            serde_json::from_str(r#"{"kind": "linear", "coefficients": [1.0, 2.0]}"#).unwrap();
        let model = spec.build(2).unwrap();
        assert_eq!(model.predict(&[1.0, 1.0]), 3.0);

        let spec: RegressorSpec = serde_json::from_str(r#"{"kind": "constant", "value": 9.2}"#).unwrap();
        assert_eq!(spec.build(21).unwrap().predict(&[]), 9.2);
    }

    #[test]
    fn test_linear_width_checked() {
        let spec = RegressorSpec::Linear(LinearRegressor {
            coefficients: vec![1.0],
            intercept: 0.0,
        });
        assert!(matches!(spec.build(2), Err(PredictError::InvalidBundle(_))));
    }
}
