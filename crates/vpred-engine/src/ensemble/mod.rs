//! Ensemble prediction over a fitted model bundle.
//!
//! Flow: reconciled feature vector -> bundle scaler -> each regressor ->
//! inverse log1p (if the target was transformed) -> clamp to non-negative.

mod bundle;
mod regressor;
mod scaler;

pub use bundle::ModelBundle;
pub use regressor::{ConstantRegressor, LinearRegressor, Regressor, RegressorSpec};
pub use scaler::StandardScaler;

#[cfg(test)]
pub use regressor::MockRegressor;

use tracing::{debug, warn};
use vpred_models::{FeatureVector, ModelEstimate};

use crate::error::{PredictError, PredictResult};

/// Upper bound on any single estimate. Keeps the confidence band finite.
pub const MAX_VIEWS: f64 = 1e12;

/// Predict with every model in the bundle, in bundle order.
pub fn predict(bundle: &ModelBundle, features: &FeatureVector) -> PredictResult<Vec<ModelEstimate>> {
    let names: Vec<String> = bundle.model_names().into_iter().map(str::to_string).collect();
    predict_models(bundle, features, &names)
}

/// Predict with the named models only.
///
/// Any requested name missing from the bundle fails the whole call with
/// [`PredictError::ModelUnavailable`]; no estimate is fabricated for it.
pub fn predict_models(
    bundle: &ModelBundle,
    features: &FeatureVector,
    requested: &[String],
) -> PredictResult<Vec<ModelEstimate>> {
    let scaler = bundle
        .scaler()
        .ok_or_else(|| PredictError::model_unavailable("bundle has no fitted scaler"))?;

    if requested.is_empty() {
        return Err(PredictError::model_unavailable("bundle has no regressors"));
    }

    let missing: Vec<&str> = requested
        .iter()
        .filter(|name| bundle.model(name).is_none())
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(PredictError::model_unavailable(format!(
            "models not in bundle: {}",
            missing.join(", ")
        )));
    }

    // Column order must match the fitted order exactly, otherwise values would
    // be scaled and weighted against the wrong features.
    if features.names.as_slice() != bundle.feature_names() {
        return Err(PredictError::invalid_bundle(
            "feature vector order does not match the bundle feature names",
        ));
    }

    let scaled = scaler.transform(&features.values)?;

    let mut estimates = Vec::with_capacity(requested.len());
    for name in requested {
        let Some(model) = bundle.model(name) else {
            continue;
        };
        let raw = model.predict(&scaled);
        let views = to_views(raw, bundle.target_transformed());
        debug!(model = %name, raw, views, "Model estimate");
        estimates.push(ModelEstimate::new(name.clone(), views));
    }

    Ok(estimates)
}

/// Convert a raw regressor output to a view count in `[0, MAX_VIEWS]`.
fn to_views(raw: f64, target_transformed: bool) -> f64 {
    let views = if target_transformed { raw.exp_m1() } else { raw };

    if views.is_nan() {
        warn!(raw, "NaN model output, clamping to 0");
        return 0.0;
    }
    if views > MAX_VIEWS {
        warn!(raw, views, cap = MAX_VIEWS, "Model output above cap");
    }

    views.clamp(0.0, MAX_VIEWS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn feature_vector(names: &[&str], values: &[f64]) -> FeatureVector {
        let mut fv = FeatureVector::default();
        for (name, value) in names.iter().zip(values) {
            fv.push(*name, *value);
        }
        fv
    }

    fn constant_bundle(values: &[(&str, f64)], transformed: bool) -> ModelBundle {
        let mut bundle = ModelBundle::new(vec!["a".to_string(), "b".to_string()], transformed)
            .with_scaler(StandardScaler::identity(2))
            .unwrap();
        for (name, value) in values {
            bundle = bundle.with_model(*name, Arc::new(ConstantRegressor { value: *value }));
        }
        bundle
    }

    #[test]
    fn test_scaled_features_reach_regressor() {
        let mut mock = MockRegressor::new();
        mock.expect_predict()
            .withf(|x: &[f64]| x == [1.0, -2.0])
            .times(1)
            .return_const(1000.0);

        let bundle = ModelBundle::new(vec!["a".to_string(), "b".to_string()], false)
            .with_scaler(StandardScaler::new(vec![2.0, 4.0], vec![2.0, 1.0]).unwrap())
            .unwrap()
            .with_model("linear", Arc::new(mock));

        let estimates = predict(&bundle, &feature_vector(&["a", "b"], &[4.0, 2.0])).unwrap();
        assert_eq!(estimates, vec![ModelEstimate::new("linear", 1000.0)]);
    }

    #[test]
    fn test_inverse_log1p_applied() {
        let bundle = constant_bundle(&[("gradient_boosting", 10_000f64.ln_1p())], true);
        let estimates = predict(&bundle, &feature_vector(&["a", "b"], &[0.0, 0.0])).unwrap();
        assert!((estimates[0].views - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_estimates_never_negative() {
        for raw in [-1e9, -5.0, -0.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e308] {
            for transformed in [false, true] {
                let bundle = constant_bundle(&[("m", raw)], transformed);
                let estimates = predict(&bundle, &feature_vector(&["a", "b"], &[1.0, 1.0])).unwrap();
                assert!(estimates[0].views >= 0.0, "raw {} gave {}", raw, estimates[0].views);
                assert!(estimates[0].views.is_finite());
            }
        }
    }

    #[test]
    fn test_overflowing_output_capped_not_zeroed() {
        for (raw, transformed) in [(1e6, true), (f64::INFINITY, false), (1e308, false)] {
            let bundle = constant_bundle(&[("m", raw)], transformed);
            let estimates = predict(&bundle, &feature_vector(&["a", "b"], &[1.0, 1.0])).unwrap();
            assert_eq!(estimates[0].views, MAX_VIEWS, "raw {}", raw);
        }

        let bundle = constant_bundle(&[("m", f64::NAN)], false);
        let estimates = predict(&bundle, &feature_vector(&["a", "b"], &[1.0, 1.0])).unwrap();
        assert_eq!(estimates[0].views, 0.0);
    }

    #[test]
    fn test_missing_scaler_is_model_unavailable() {
        let bundle = ModelBundle::new(vec!["a".to_string()], false)
            .with_model("m", Arc::new(ConstantRegressor { value: 1.0 }));
        let result = predict(&bundle, &feature_vector(&["a"], &[1.0]));
        assert!(matches!(result, Err(PredictError::ModelUnavailable(_))));
    }

    #[test]
    fn test_empty_bundle_is_model_unavailable() {
        let bundle = constant_bundle(&[], false);
        let result = predict(&bundle, &feature_vector(&["a", "b"], &[1.0, 1.0]));
        assert!(matches!(result, Err(PredictError::ModelUnavailable(_))));
    }

    #[test]
    fn test_requested_model_missing_fabricates_nothing() {
        let bundle = constant_bundle(&[("random_forest", 5.0)], false);
        let requested = vec!["random_forest".to_string(), "gradient_boosting".to_string()];
        let result = predict_models(&bundle, &feature_vector(&["a", "b"], &[1.0, 1.0]), &requested);

        match result {
            Err(PredictError::ModelUnavailable(msg)) => assert!(msg.contains("gradient_boosting")),
            other => panic!("expected ModelUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_feature_order_mismatch_rejected() {
        let bundle = constant_bundle(&[("m", 5.0)], false);
        let result = predict(&bundle, &feature_vector(&["b", "a"], &[1.0, 1.0]));
        assert!(matches!(result, Err(PredictError::InvalidBundle(_))));
    }

    #[test]
    fn test_subset_selection_keeps_requested_order() {
        let bundle = constant_bundle(&[("a_model", 1.0), ("b_model", 2.0), ("c_model", 3.0)], false);
        let requested = vec!["c_model".to_string(), "a_model".to_string()];
        let estimates =
            predict_models(&bundle, &feature_vector(&["a", "b"], &[0.0, 0.0]), &requested).unwrap();
        let names: Vec<_> = estimates.iter().map(|e| e.model.as_str()).collect();
        assert_eq!(names, vec!["c_model", "a_model"]);
    }
}
