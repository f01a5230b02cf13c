//! Metadata to feature-vector conversion.

use std::f64::consts::PI;
use std::sync::Arc;

use chrono::{Datelike, Timelike};
use tracing::debug;
use vpred_models::{FeatureName, FeatureVector, SchemaReport, VideoMetadata, FEATURE_COUNT};

use super::schema::reconcile;
use crate::clock::{Clock, SystemClock};

const SECONDS_PER_DAY: i64 = 86_400;

/// Feature vector aligned to a target schema, with the reconciliation report.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedFeatures {
    pub vector: FeatureVector,
    pub schema: SchemaReport,
}

/// Converts validated metadata into model features.
///
/// Pure apart from the injected clock, which is only read for
/// `days_since_upload`.
#[derive(Clone)]
pub struct FeatureExtractor {
    clock: Arc<dyn Clock>,
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FeatureExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureExtractor").finish_non_exhaustive()
    }
}

impl FeatureExtractor {
    /// Extractor reading wall-clock time.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Whole days between upload and now, floored at 1.
    ///
    /// The floor keeps later per-day rates free of a zero divisor, including
    /// for same-day and future-dated uploads.
    pub fn days_since_upload(&self, meta: &VideoMetadata) -> i64 {
        let elapsed = self.clock.now().signed_duration_since(meta.upload_at);
        elapsed.num_seconds().div_euclid(SECONDS_PER_DAY).max(1)
    }

    /// Compute all canonical features, in canonical order.
    pub fn compute(&self, meta: &VideoMetadata) -> Vec<(FeatureName, f64)> {
        let duration = meta.duration as f64;
        let hour = meta.upload_at.hour() as f64;
        let weekday = meta.upload_at.weekday().num_days_from_monday() as f64;
        let is_weekend = if weekday >= 5.0 { 1.0 } else { 0.0 };
        let days_since_upload = self.days_since_upload(meta) as f64;

        let (hour_sin, hour_cos) = cyclical(hour, 24.0);
        let (day_sin, day_cos) = cyclical(weekday, 7.0);

        let features = vec![
            (FeatureName::Duration, duration),
            (FeatureName::DurationMinutes, meta.duration_minutes()),
            // Non-positive durations are degenerate; keep the log finite.
            (FeatureName::LogDuration, duration.max(0.0).ln_1p()),
            (FeatureName::LikeCount, meta.like_count as f64),
            (FeatureName::DislikeCount, meta.dislike_count as f64),
            (FeatureName::LikeRatio, meta.like_ratio()),
            (FeatureName::EngagementRate, meta.engagement_rate()),
            (FeatureName::TitleLength, meta.title_length() as f64),
            (FeatureName::DescriptionLength, meta.description_length() as f64),
            (FeatureName::TagsCount, meta.tags_count() as f64),
            (FeatureName::TitleWordCount, meta.title_word_count() as f64),
            (FeatureName::UploadHour, hour),
            (FeatureName::UploadDayOfWeek, weekday),
            (FeatureName::UploadMonth, meta.upload_at.month() as f64),
            (FeatureName::IsWeekend, is_weekend),
            (FeatureName::UploadHourSin, hour_sin),
            (FeatureName::UploadHourCos, hour_cos),
            (FeatureName::UploadDaySin, day_sin),
            (FeatureName::UploadDayCos, day_cos),
            (FeatureName::DaysSinceUpload, days_since_upload),
            (FeatureName::LogDaysSinceUpload, days_since_upload.ln_1p()),
        ];
        debug_assert_eq!(features.len(), FEATURE_COUNT);

        debug!(
            duration = meta.duration,
            upload_at = %meta.upload_at,
            days_since_upload,
            "Computed video features"
        );

        features
    }

    /// Compute features and align them to `target` (the model's feature order).
    pub fn extract(&self, meta: &VideoMetadata, target: &[String]) -> ExtractedFeatures {
        let computed = self.compute(meta);
        let (vector, schema) = reconcile(&computed, target);
        ExtractedFeatures { vector, schema }
    }

    /// Compute features in canonical order with no reconciliation needed.
    pub fn extract_canonical(&self, meta: &VideoMetadata) -> FeatureVector {
        let mut vector = FeatureVector::with_capacity(FEATURE_COUNT);
        for (feature, value) in self.compute(meta) {
            vector.push(feature.as_str(), value);
        }
        vector
    }
}

/// sin/cos encoding of a periodic quantity so the wrap-around point is adjacent.
fn cyclical(value: f64, period: f64) -> (f64, f64) {
    let angle = 2.0 * PI * value / period;
    (angle.sin(), angle.cos())
}
