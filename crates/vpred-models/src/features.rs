//! Feature schema and feature vector models.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of features in the canonical schema.
pub const FEATURE_COUNT: usize = 21;

/// A named feature in the canonical schema.
///
/// Declaration order is the canonical column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FeatureName {
    Duration,
    DurationMinutes,
    LogDuration,
    LikeCount,
    DislikeCount,
    LikeRatio,
    EngagementRate,
    TitleLength,
    DescriptionLength,
    TagsCount,
    TitleWordCount,
    UploadHour,
    UploadDayOfWeek,
    UploadMonth,
    IsWeekend,
    UploadHourSin,
    UploadHourCos,
    UploadDaySin,
    UploadDayCos,
    DaysSinceUpload,
    LogDaysSinceUpload,
}

impl FeatureName {
    /// All features in canonical order.
    pub const ALL: [FeatureName; FEATURE_COUNT] = [
        FeatureName::Duration,
        FeatureName::DurationMinutes,
        FeatureName::LogDuration,
        FeatureName::LikeCount,
        FeatureName::DislikeCount,
        FeatureName::LikeRatio,
        FeatureName::EngagementRate,
        FeatureName::TitleLength,
        FeatureName::DescriptionLength,
        FeatureName::TagsCount,
        FeatureName::TitleWordCount,
        FeatureName::UploadHour,
        FeatureName::UploadDayOfWeek,
        FeatureName::UploadMonth,
        FeatureName::IsWeekend,
        FeatureName::UploadHourSin,
        FeatureName::UploadHourCos,
        FeatureName::UploadDaySin,
        FeatureName::UploadDayCos,
        FeatureName::DaysSinceUpload,
        FeatureName::LogDaysSinceUpload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureName::Duration => "duration",
            FeatureName::DurationMinutes => "duration_minutes",
            FeatureName::LogDuration => "log_duration",
            FeatureName::LikeCount => "like_count",
            FeatureName::DislikeCount => "dislike_count",
            FeatureName::LikeRatio => "like_ratio",
            FeatureName::EngagementRate => "engagement_rate",
            FeatureName::TitleLength => "title_length",
            FeatureName::DescriptionLength => "description_length",
            FeatureName::TagsCount => "tags_count",
            FeatureName::TitleWordCount => "title_word_count",
            FeatureName::UploadHour => "upload_hour",
            FeatureName::UploadDayOfWeek => "upload_day_of_week",
            FeatureName::UploadMonth => "upload_month",
            FeatureName::IsWeekend => "is_weekend",
            FeatureName::UploadHourSin => "upload_hour_sin",
            FeatureName::UploadHourCos => "upload_hour_cos",
            FeatureName::UploadDaySin => "upload_day_sin",
            FeatureName::UploadDayCos => "upload_day_cos",
            FeatureName::DaysSinceUpload => "days_since_upload",
            FeatureName::LogDaysSinceUpload => "log_days_since_upload",
        }
    }

    /// Canonical schema as owned names, the default target for reconciliation.
    pub fn canonical_names() -> Vec<String> {
        Self::ALL.iter().map(|f| f.as_str().to_string()).collect()
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeatureName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown feature '{}'", s))
    }
}

/// An ordered feature vector aligned to a target schema.
///
/// `names[i]` labels `values[i]`; the order is exactly the order the scaler and
/// regressors were fitted with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeatureVector {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.names.push(name.into());
        self.values.push(value);
    }

    /// Look up a value by feature name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    /// Look up a canonical feature.
    pub fn feature(&self, feature: FeatureName) -> Option<f64> {
        self.get(feature.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.names.iter().map(String::as_str).zip(self.values.iter().copied())
    }

    /// True if every value is finite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

/// Discrepancies found while aligning computed features to a target schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SchemaReport {
    /// Target features that were not computed and were filled with 0
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,

    /// Computed features the target schema does not expect
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<String>,
}

impl SchemaReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.dropped.is_empty()
    }

    /// Human-readable warnings, one per kind of discrepancy.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.missing.is_empty() {
            warnings.push(format!(
                "Missing features defaulted to 0: {}",
                self.missing.join(", ")
            ));
        }
        if !self.dropped.is_empty() {
            warnings.push(format!(
                "Features not used by the model were dropped: {}",
                self.dropped.join(", ")
            ));
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_has_21_unique_names() {
        let names = FeatureName::canonical_names();
        assert_eq!(names.len(), FEATURE_COUNT);

        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_name_round_trip_and_serde() {
        for feature in FeatureName::ALL {
            assert_eq!(feature.as_str().parse::<FeatureName>().unwrap(), feature);
            let json = serde_json::to_string(&feature).unwrap();
            assert_eq!(json, format!("\"{}\"", feature.as_str()));
        }
        assert!("views".parse::<FeatureName>().is_err());
    }

    #[test]
    fn test_feature_vector_lookup() {
        let mut fv = FeatureVector::with_capacity(2);
        fv.push("duration", 900.0);
        fv.push("like_ratio", 0.5);

        assert_eq!(fv.len(), 2);
        assert_eq!(fv.feature(FeatureName::Duration), Some(900.0));
        assert_eq!(fv.get("like_ratio"), Some(0.5));
        assert_eq!(fv.get("tags_count"), None);
        assert!(fv.is_finite());
    }

    #[test]
    fn test_schema_report_warnings() {
        let clean = SchemaReport::default();
        assert!(clean.is_clean());
        assert!(clean.warnings().is_empty());

        let report = SchemaReport {
            missing: vec!["channel_age".to_string()],
            dropped: vec!["upload_month".to_string()],
        };
        assert!(!report.is_clean());
        let warnings = report.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("channel_age"));
        assert!(warnings[1].contains("upload_month"));
    }
}
