//! Schema reconciliation between computed features and a model's expected columns.

use tracing::warn;
use vpred_models::{FeatureName, FeatureVector, SchemaReport};

/// Value injected for target features that were not computed.
pub const MISSING_FEATURE_DEFAULT: f64 = 0.0;

/// Align computed features to `target`, in `target` order.
///
/// Target names with no computed value are filled with
/// [`MISSING_FEATURE_DEFAULT`] and listed as missing; computed features absent
/// from the target are dropped and listed as dropped. The output column order
/// is exactly `target`, which is the order the scaler was fitted with.
pub fn reconcile(computed: &[(FeatureName, f64)], target: &[String]) -> (FeatureVector, SchemaReport) {
    let mut vector = FeatureVector::with_capacity(target.len());
    let mut report = SchemaReport::default();

    for name in target {
        match computed.iter().find(|(feature, _)| feature.as_str() == name) {
            Some((_, value)) => vector.push(name.clone(), *value),
            None => {
                vector.push(name.clone(), MISSING_FEATURE_DEFAULT);
                if !report.missing.contains(name) {
                    report.missing.push(name.clone());
                }
            }
        }
    }

    report.dropped = computed
        .iter()
        .map(|(feature, _)| feature.as_str())
        .filter(|name| !target.iter().any(|t| t == name))
        .map(str::to_string)
        .collect();

    if !report.is_clean() {
        warn!(
            missing = ?report.missing,
            dropped = ?report.dropped,
            "Feature schema mismatch, reconciled with defaults"
        );
    }

    (vector, report)
}
