//! End-to-end prediction flow.
//!
//! metadata -> features (aligned to the bundle schema) -> ensemble ->
//! confidence band -> insights and summary.
//!
//! A [`Predictor`] owns one read-only [`ModelBundle`] for its lifetime and can
//! be shared across threads behind an `Arc`.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;
use vpred_models::{
    FeatureName, FeatureVector, ModelEstimate, PredictionOutcome, PredictionReport,
    PredictionResult, PredictionSource, SchemaReport, VideoMetadata, VideoMetadataInput,
};

use crate::analysis;
use crate::clock::Clock;
use crate::confidence;
use crate::config::PredictorConfig;
use crate::ensemble::{self, ModelBundle};
use crate::error::{PredictError, PredictResult};
use crate::features::{ExtractedFeatures, FeatureExtractor};
use crate::insights::InsightGenerator;
use crate::loader::{JsonBundleLoader, ModelLoader};
use crate::metrics;

/// Model name reported for heuristic demo estimates.
pub const DEMO_MODEL_NAME: &str = "demo_heuristic";

const DEMO_MIN_VIEWS: f64 = 10_000.0;
const DEMO_MAX_VIEWS: f64 = 1_000_000.0;

/// Orchestrates feature extraction, prediction and interpretation.
#[derive(Debug, Clone)]
pub struct Predictor {
    config: PredictorConfig,
    bundle: Option<Arc<ModelBundle>>,
    extractor: FeatureExtractor,
    insights: InsightGenerator,
}

impl Predictor {
    pub fn new(config: PredictorConfig, bundle: Option<ModelBundle>) -> Self {
        Self {
            config,
            bundle: bundle.map(Arc::new),
            extractor: FeatureExtractor::new(),
            insights: InsightGenerator::new(),
        }
    }

    /// Build a predictor, loading the bundle named by `config.bundle_path`.
    ///
    /// A load failure leaves the predictor without a bundle; predictions then
    /// fail with `ModelUnavailable` (or fall back to demo estimates if
    /// enabled) while features are still computed.
    pub fn from_config(config: PredictorConfig) -> Self {
        let bundle = match config.bundle_path.as_deref() {
            Some(path) => match JsonBundleLoader::new(path).load() {
                Ok(bundle) => Some(bundle),
                Err(e) => {
                    warn!(path = %path, error = %e, "Failed to load model bundle");
                    None
                }
            },
            None => {
                warn!("No model bundle configured");
                None
            }
        };

        Self::new(config, bundle)
    }

    /// Replace the clock used for `days_since_upload`.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.extractor = FeatureExtractor::with_clock(clock);
        self
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    pub fn bundle(&self) -> Option<&ModelBundle> {
        self.bundle.as_deref()
    }

    pub fn has_bundle(&self) -> bool {
        self.bundle.is_some()
    }

    /// Feature order predictions are made against.
    pub fn feature_names(&self) -> Vec<String> {
        match &self.bundle {
            Some(bundle) => bundle.feature_names().to_vec(),
            None => FeatureName::canonical_names(),
        }
    }

    /// Model names available for prediction (empty without a bundle).
    pub fn model_names(&self) -> Vec<String> {
        self.bundle
            .as_ref()
            .map(|b| b.model_names().into_iter().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Compute features aligned to the bundle schema (canonical order when no
    /// bundle is loaded).
    pub fn extract(&self, meta: &VideoMetadata) -> ExtractedFeatures {
        match &self.bundle {
            Some(bundle) => self.extractor.extract(meta, bundle.feature_names()),
            None => ExtractedFeatures {
                vector: self.extractor.extract_canonical(meta),
                schema: SchemaReport::default(),
            },
        }
    }

    /// Predict views for a video.
    pub fn predict_views(&self, meta: &VideoMetadata) -> PredictResult<PredictionResult> {
        let extracted = self.extract(meta);
        self.predict_from(meta, &extracted.vector)
    }

    /// Full report for a video. Never fails: prediction errors are carried in
    /// the report next to the computed features.
    pub fn predict(&self, meta: &VideoMetadata) -> PredictionReport {
        let request_id = Uuid::new_v4().to_string();
        let extracted = self.extract(meta);

        if !extracted.schema.is_clean() {
            metrics::record_schema_mismatch(
                extracted.schema.missing.len(),
                extracted.schema.dropped.len(),
            );
        }

        let (prediction, insights, summary) = match self.predict_from(meta, &extracted.vector) {
            Ok(result) => {
                metrics::record_prediction(result.source, result.best_prediction);
                info!(
                    request_id = %request_id,
                    best_model = %result.best_model,
                    best_prediction = result.best_prediction,
                    confidence = %result.confidence_level,
                    source = ?result.source,
                    "Prediction complete"
                );

                let insights =
                    self.insights
                        .generate(meta, &result.predictions, result.best_prediction);
                let summary = analysis::summarize(meta, &result);
                (PredictionOutcome::Predicted(result), Some(insights), Some(summary))
            }
            Err(e) => {
                metrics::record_prediction_failure(e.kind());
                warn!(request_id = %request_id, error = %e, "Prediction unavailable");
                (
                    PredictionOutcome::Unavailable {
                        error: e.to_string(),
                    },
                    None,
                    None,
                )
            }
        };

        PredictionReport {
            request_id,
            features: extracted.vector,
            warnings: extracted.schema.warnings(),
            prediction,
            insights,
            summary,
        }
    }

    /// Validate raw input, then build the full report.
    pub fn predict_input(&self, input: VideoMetadataInput) -> PredictResult<PredictionReport> {
        let meta = VideoMetadata::try_from(input)?;
        Ok(self.predict(&meta))
    }

    fn predict_from(
        &self,
        meta: &VideoMetadata,
        features: &FeatureVector,
    ) -> PredictResult<PredictionResult> {
        let (estimates, source) = match &self.bundle {
            Some(bundle) => {
                self.check_required_models(bundle)?;
                (ensemble::predict(bundle, features)?, PredictionSource::Model)
            }
            None if self.config.demo_mode => {
                warn!("No model bundle, using demo estimate");
                let views = demo_estimate(meta);
                (
                    vec![ModelEstimate::new(DEMO_MODEL_NAME, views)],
                    PredictionSource::Demo,
                )
            }
            None => {
                return Err(PredictError::model_unavailable("no model bundle loaded"));
            }
        };

        let best = estimates
            .iter()
            .find(|e| e.model == self.config.canonical_model)
            .or_else(|| estimates.first())
            .cloned()
            .ok_or_else(|| PredictError::model_unavailable("ensemble produced no estimates"))?;

        let band = confidence::estimate(best.views);
        let agreement = confidence::model_agreement(
            &estimates.iter().map(|e| e.views).collect::<Vec<_>>(),
        );
        let days = self.extractor.days_since_upload(meta) as f64;

        Ok(PredictionResult {
            predictions: estimates,
            best_model: best.model,
            best_prediction: best.views,
            confidence_lower: band.lower,
            confidence_upper: band.upper,
            confidence_level: band.level,
            agreement,
            views_per_day: best.views / days,
            source,
        })
    }

    fn check_required_models(&self, bundle: &ModelBundle) -> PredictResult<()> {
        let missing: Vec<&str> = self
            .config
            .required_models
            .iter()
            .filter(|name| bundle.model(name).is_none())
            .map(String::as_str)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PredictError::model_unavailable(format!(
                "required models not in bundle: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Deterministic engagement- and duration-driven estimate for demo mode.
///
/// Stays within 10k..=1M views so it reads as plausible without resembling a
/// fitted prediction.
pub fn demo_estimate(meta: &VideoMetadata) -> f64 {
    let engagement = meta.like_count as f64 * 40.0 + meta.dislike_count as f64 * 10.0;

    let minutes = meta.duration_minutes();
    let duration_factor = if (5.0..=20.0).contains(&minutes) {
        1.0
    } else {
        0.8
    };

    ((DEMO_MIN_VIEWS + engagement) * duration_factor).clamp(DEMO_MIN_VIEWS, DEMO_MAX_VIEWS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::ensemble::{ConstantRegressor, StandardScaler};
    use chrono::NaiveDate;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            NaiveDate::from_ymd_opt(2024, 1, 25)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        ))
    }

    fn meta() -> VideoMetadata {
        VideoMetadata {
            title: "Complete Python Tutorial for Beginners".to_string(),
            description: "Learn Python programming from scratch".to_string(),
            duration: 900,
            like_count: 1250,
            dislike_count: 45,
            upload_at: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            tags: "python,tutorial,programming,beginners,coding".to_string(),
            channel_id: None,
        }
    }

    fn bundle(models: &[(&str, f64)]) -> ModelBundle {
        let names = FeatureName::canonical_names();
        let width = names.len();
        let mut bundle = ModelBundle::new(names, false)
            .with_scaler(StandardScaler::identity(width))
            .unwrap();
        for (name, value) in models {
            bundle = bundle.with_model(*name, Arc::new(ConstantRegressor { value: *value }));
        }
        bundle
    }

    #[test]
    fn test_canonical_model_is_best() {
        let predictor = Predictor::new(
            PredictorConfig::default(),
            Some(bundle(&[("random_forest", 20_000.0), ("gradient_boosting", 25_000.0)])),
        )
        .with_clock(clock());

        let result = predictor.predict_views(&meta()).unwrap();
        assert_eq!(result.best_model, "gradient_boosting");
        assert_eq!(result.best_prediction, 25_000.0);
        assert_eq!(result.confidence_lower, 25_000.0 * 0.7);
        assert_eq!(result.source, PredictionSource::Model);
        assert!(result.agreement.is_some());
        // 10 days since upload
        assert_eq!(result.views_per_day, 2_500.0);
    }

    #[test]
    fn test_first_model_when_canonical_absent() {
        let predictor = Predictor::new(
            PredictorConfig::default(),
            Some(bundle(&[("ridge", 5_000.0), ("random_forest", 6_000.0)])),
        )
        .with_clock(clock());

        let result = predictor.predict_views(&meta()).unwrap();
        assert_eq!(result.best_model, "ridge");
        assert_eq!(result.confidence_level, vpred_models::ConfidenceLevel::Low);
    }

    #[test]
    fn test_huge_estimate_keeps_band_finite() {
        let predictor = Predictor::new(
            PredictorConfig::default(),
            Some(bundle(&[("gradient_boosting", f64::MAX)])),
        )
        .with_clock(clock());

        let result = predictor.predict_views(&meta()).unwrap();
        assert_eq!(result.best_prediction, crate::ensemble::MAX_VIEWS);
        assert!(result.confidence_upper.is_finite());
        assert!(result.views_per_day.is_finite());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["confidence_upper"].is_number());
    }

    #[test]
    fn test_required_model_missing() {
        let config = PredictorConfig {
            required_models: vec!["gradient_boosting".to_string(), "xgboost".to_string()],
            ..PredictorConfig::default()
        };
        let predictor = Predictor::new(config, Some(bundle(&[("gradient_boosting", 1.0)])));

        let err = predictor.predict_views(&meta()).unwrap_err();
        assert!(matches!(err, PredictError::ModelUnavailable(ref msg) if msg.contains("xgboost")));
    }

    #[test]
    fn test_no_bundle_report_keeps_features() {
        let predictor = Predictor::new(PredictorConfig::default(), None).with_clock(clock());
        let report = predictor.predict(&meta());

        assert!(!report.is_predicted());
        assert_eq!(report.features.len(), 21);
        assert!(report.insights.is_none());
        assert!(report.summary.is_none());
        match report.prediction {
            PredictionOutcome::Unavailable { error } => assert!(error.contains("no model bundle")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_demo_mode_is_labelled() {
        let config = PredictorConfig {
            demo_mode: true,
            ..PredictorConfig::default()
        };
        let predictor = Predictor::new(config, None).with_clock(clock());

        let result = predictor.predict_views(&meta()).unwrap();
        assert!(result.is_demo());
        assert_eq!(result.best_model, DEMO_MODEL_NAME);
        // (10_000 + 1250 * 40 + 45 * 10) * 1.0
        assert_eq!(result.best_prediction, 60_450.0);
        assert!(result.agreement.is_none());
    }

    #[test]
    fn test_demo_mode_ignored_when_bundle_loaded() {
        let config = PredictorConfig {
            demo_mode: true,
            ..PredictorConfig::default()
        };
        let predictor = Predictor::new(config, Some(bundle(&[("gradient_boosting", 42.0)])));

        let result = predictor.predict_views(&meta()).unwrap();
        assert_eq!(result.source, PredictionSource::Model);
        assert_eq!(result.best_prediction, 42.0);
    }

    #[test]
    fn test_demo_estimate_bounds() {
        let mut m = meta();
        m.like_count = 0;
        m.dislike_count = 0;
        m.duration = 60;
        assert_eq!(demo_estimate(&m), DEMO_MIN_VIEWS);

        m.like_count = u64::MAX;
        assert_eq!(demo_estimate(&m), DEMO_MAX_VIEWS);
    }

    #[test]
    fn test_schema_warnings_reported() {
        let names = vec!["duration".to_string(), "subscriber_count".to_string()];
        let bundle = ModelBundle::new(names, false)
            .with_scaler(StandardScaler::identity(2))
            .unwrap()
            .with_model("gradient_boosting", Arc::new(ConstantRegressor { value: 100.0 }));
        let predictor = Predictor::new(PredictorConfig::default(), Some(bundle)).with_clock(clock());

        let report = predictor.predict(&meta());
        assert!(report.is_predicted());
        assert_eq!(report.features.names, vec!["duration", "subscriber_count"]);
        assert_eq!(report.features.get("subscriber_count"), Some(0.0));
        assert_eq!(report.warnings.len(), 2);
        assert!(report.insights.is_some());
        assert!(report.summary.is_some());
    }

    #[test]
    fn test_predict_input_rejects_negative_duration() {
        let predictor = Predictor::new(PredictorConfig::default(), None);
        let input = VideoMetadataInput {
            title: "Title".to_string(),
            description: String::new(),
            duration: -5,
            like_count: 0,
            dislike_count: 0,
            upload_date: "2024-01-15".to_string(),
            upload_hour: None,
            tags: String::new(),
            channel_id: None,
        };

        let err = predictor.predict_input(input).unwrap_err();
        assert_eq!(err.field(), Some("duration"));
    }
}
