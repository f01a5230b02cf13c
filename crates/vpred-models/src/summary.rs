//! Human-readable prediction summary models.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::prediction::ConfidenceLevel;

/// Expected performance bucket for a point prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTier {
    /// More than 1M views
    Viral,
    /// More than 100K views
    Strong,
    /// More than 10K views
    Moderate,
    Niche,
}

impl PerformanceTier {
    pub fn from_views(views: f64) -> Self {
        if views > 1_000_000.0 {
            PerformanceTier::Viral
        } else if views > 100_000.0 {
            PerformanceTier::Strong
        } else if views > 10_000.0 {
            PerformanceTier::Moderate
        } else {
            PerformanceTier::Niche
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PerformanceTier::Viral => "Viral potential - High chance of going viral",
            PerformanceTier::Strong => "Strong performance - Expected to perform well",
            PerformanceTier::Moderate => "Moderate performance - Decent viewership expected",
            PerformanceTier::Niche => "Niche content - Targeted audience expected",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Display-ready summary of a video and its prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoSummary {
    pub title: String,
    /// Description truncated to 100 characters
    pub description: String,
    /// Duration as `M:SS`
    pub duration: String,
    pub upload_date: String,
    pub tags: String,
    /// Point prediction with thousands separators
    pub predicted_views: String,
    /// `lower - upper` with thousands separators
    pub confidence_range: String,
    pub prediction_quality: ConfidenceLevel,
    pub performance_tier: PerformanceTier,
    pub expected_performance: String,
    pub key_factors: Vec<String>,
    pub recommendations: Vec<String>,
}
