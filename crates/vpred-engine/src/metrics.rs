//! Prediction metrics.
//!
//! Recorded through the `metrics` facade; they are no-ops until a binary
//! installs a recorder.

use metrics::{counter, histogram};
use vpred_models::PredictionSource;

/// Metric names as constants for consistency.
pub mod names {
    pub const PREDICTIONS_TOTAL: &str = "vpred_predictions_total";
    pub const PREDICTION_FAILURES_TOTAL: &str = "vpred_prediction_failures_total";
    pub const SCHEMA_MISMATCHES_TOTAL: &str = "vpred_schema_mismatches_total";
    pub const PREDICTED_VIEWS: &str = "vpred_predicted_views";
}

pub fn record_prediction(source: PredictionSource, best_prediction: f64) {
    let source = match source {
        PredictionSource::Model => "model",
        PredictionSource::Demo => "demo",
    };
    let labels = [("source", source.to_string())];
    counter!(names::PREDICTIONS_TOTAL, &labels).increment(1);
    histogram!(names::PREDICTED_VIEWS, &labels).record(best_prediction);
}

pub fn record_prediction_failure(reason: &str) {
    let labels = [("reason", reason.to_string())];
    counter!(names::PREDICTION_FAILURES_TOTAL, &labels).increment(1);
}

pub fn record_schema_mismatch(missing: usize, dropped: usize) {
    let labels = [
        ("missing", (missing > 0).to_string()),
        ("dropped", (dropped > 0).to_string()),
    ];
    counter!(names::SCHEMA_MISMATCHES_TOTAL, &labels).increment(1);
}
