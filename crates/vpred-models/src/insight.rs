//! Categorized insight report models.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fixed insight categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum InsightCategory {
    #[serde(rename = "Content Optimization")]
    ContentOptimization,
    #[serde(rename = "Timing & Strategy")]
    TimingStrategy,
    #[serde(rename = "Engagement Potential")]
    EngagementPotential,
    #[serde(rename = "SEO & Discoverability")]
    SeoDiscoverability,
    #[serde(rename = "Performance Insights")]
    PerformanceInsights,
    #[serde(rename = "Improvement Recommendations")]
    ImprovementRecommendations,
}

impl InsightCategory {
    pub const ALL: [InsightCategory; 6] = [
        InsightCategory::ContentOptimization,
        InsightCategory::TimingStrategy,
        InsightCategory::EngagementPotential,
        InsightCategory::SeoDiscoverability,
        InsightCategory::PerformanceInsights,
        InsightCategory::ImprovementRecommendations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::ContentOptimization => "Content Optimization",
            InsightCategory::TimingStrategy => "Timing & Strategy",
            InsightCategory::EngagementPotential => "Engagement Potential",
            InsightCategory::SeoDiscoverability => "SEO & Discoverability",
            InsightCategory::PerformanceInsights => "Performance Insights",
            InsightCategory::ImprovementRecommendations => "Improvement Recommendations",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered factor messages per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct InsightReport {
    pub categories: BTreeMap<InsightCategory, Vec<String>>,
}

impl InsightReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: InsightCategory, messages: Vec<String>) {
        self.categories.insert(category, messages);
    }

    /// Messages for a category (empty slice if the category is absent).
    pub fn get(&self, category: InsightCategory) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate categories in report order.
    pub fn iter(&self) -> impl Iterator<Item = (InsightCategory, &[String])> {
        self.categories.iter().map(|(c, m)| (*c, m.as_slice()))
    }
}
