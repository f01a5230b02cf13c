//! Rule tables, one ordered list per insight category.
//!
//! Each rule inspects the [`InsightContext`] and emits at most one message.
//! Rules run in table order, so the report is identical for identical inputs.

use vpred_models::{AgreementLevel, InsightCategory, ModelAgreement, VideoMetadata};

/// Quantities the rules read, derived once per request.
#[derive(Debug, Clone)]
pub struct InsightContext {
    pub duration_minutes: f64,
    pub title_length: usize,
    pub description_length: usize,
    pub tags_count: usize,
    pub like_ratio: f64,
    pub engagement_rate: f64,
    pub upload_hour: u32,
    pub is_weekend: bool,
    /// Lower-cased title for keyword matching
    pub title: String,
    pub best_prediction: f64,
    pub agreement: Option<ModelAgreement>,
}

impl InsightContext {
    pub fn new(meta: &VideoMetadata, best_prediction: f64, agreement: Option<ModelAgreement>) -> Self {
        use chrono::{Datelike, Timelike};

        Self {
            duration_minutes: meta.duration_minutes(),
            title_length: meta.title_length(),
            description_length: meta.description_length(),
            tags_count: meta.tags_count(),
            like_ratio: meta.like_ratio(),
            engagement_rate: meta.engagement_rate(),
            upload_hour: meta.upload_at.hour(),
            is_weekend: meta.upload_at.weekday().num_days_from_monday() >= 5,
            title: meta.title.to_lowercase(),
            best_prediction,
            agreement,
        }
    }

    /// Case-insensitive substring match against any keyword.
    pub fn title_mentions(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.title.contains(k))
    }
}

pub type Rule = fn(&InsightContext) -> Option<&'static str>;

pub const EDUCATIONAL_KEYWORDS: &[&str] = &["tutorial", "how to", "guide", "learn"];
pub const REVIEW_KEYWORDS: &[&str] = &["review", "test", "unboxing"];
pub const TRENDING_KEYWORDS: &[&str] = &["2024", "new", "latest"];

/// Ordered rules for a category.
pub fn rules_for(category: InsightCategory) -> &'static [Rule] {
    match category {
        InsightCategory::ContentOptimization => CONTENT_RULES,
        InsightCategory::TimingStrategy => TIMING_RULES,
        InsightCategory::EngagementPotential => ENGAGEMENT_RULES,
        InsightCategory::SeoDiscoverability => SEO_RULES,
        InsightCategory::PerformanceInsights => PERFORMANCE_RULES,
        InsightCategory::ImprovementRecommendations => IMPROVEMENT_RULES,
    }
}

/// Message used when no rule in a category fires.
pub fn placeholder(category: InsightCategory) -> &'static str {
    match category {
        InsightCategory::ContentOptimization => "✅ Standard content profile",
        InsightCategory::TimingStrategy => "✅ Standard upload timing",
        InsightCategory::EngagementPotential => "✅ Standard engagement profile",
        InsightCategory::SeoDiscoverability => "✅ Standard discoverability profile",
        InsightCategory::PerformanceInsights => "📊 No notable performance signals",
        InsightCategory::ImprovementRecommendations => {
            "✅ Content looks well optimized - no major changes needed"
        }
    }
}

const CONTENT_RULES: &[Rule] = &[duration_band, title_length_band, description_band];
const TIMING_RULES: &[Rule] = &[upload_hour_band, upload_day];
const ENGAGEMENT_RULES: &[Rule] = &[like_ratio_band, engagement_band];
const SEO_RULES: &[Rule] = &[tag_coverage, educational_keywords, review_keywords, trending_keywords];
const PERFORMANCE_RULES: &[Rule] = &[performance_band, model_agreement];
const IMPROVEMENT_RULES: &[Rule] = &[
    duration_advice,
    title_advice,
    description_advice,
    tags_advice,
    timing_advice,
    engagement_advice,
    content_type_advice,
];

// Content Optimization

fn duration_band(ctx: &InsightContext) -> Option<&'static str> {
    let m = ctx.duration_minutes;
    Some(if (10.0..=20.0).contains(&m) {
        "✅ Optimal duration (10-20 min) - perfect for most content types"
    } else if m < 5.0 {
        "⚠️ Short duration - consider adding more value or making it part of a series"
    } else if m > 30.0 {
        "⚠️ Long duration - ensure high engagement throughout to maintain retention"
    } else {
        "✅ Good duration range for your content type"
    })
}

fn title_length_band(ctx: &InsightContext) -> Option<&'static str> {
    Some(if ctx.title_length > 40 {
        "✅ Strong title length - good for SEO and click-through"
    } else if ctx.title_length < 20 {
        "⚠️ Short title - consider adding more descriptive keywords"
    } else {
        "✅ Adequate title length"
    })
}

fn description_band(ctx: &InsightContext) -> Option<&'static str> {
    Some(if ctx.description_length > 100 {
        "✅ Detailed description - excellent for SEO and viewer understanding"
    } else if ctx.description_length > 50 {
        "✅ Good description length - provides context"
    } else {
        "⚠️ Short description - consider adding more details about content"
    })
}

// Timing & Strategy

fn upload_hour_band(ctx: &InsightContext) -> Option<&'static str> {
    Some(match ctx.upload_hour {
        14..=18 => "✅ Prime upload time (2-6 PM) - optimal for engagement",
        19..=22 => "✅ Evening upload time - good for after-work viewing",
        9..=13 => "✅ Morning upload time - good for early viewers",
        _ => "⚠️ Off-peak upload time - consider uploading during 2-6 PM for better reach",
    })
}

fn upload_day(ctx: &InsightContext) -> Option<&'static str> {
    Some(if ctx.is_weekend {
        "✅ Weekend upload - good for leisure viewing and binge-watching"
    } else {
        "✅ Weekday upload - good for regular content schedule"
    })
}

// Engagement Potential

fn like_ratio_band(ctx: &InsightContext) -> Option<&'static str> {
    let r = ctx.like_ratio;
    Some(if r > 0.9 {
        "✅ Excellent like ratio - very positive reception expected"
    } else if r > 0.8 {
        "✅ High like ratio - strong positive engagement"
    } else if r > 0.7 {
        "✅ Good like ratio - positive reception"
    } else if r > 0.5 {
        "⚠️ Moderate like ratio - mixed reception expected"
    } else {
        "⚠️ Low like ratio - may need content adjustment"
    })
}

fn engagement_band(ctx: &InsightContext) -> Option<&'static str> {
    Some(if ctx.engagement_rate > 10.0 {
        "✅ High engagement rate - strong viewer interaction expected"
    } else if ctx.engagement_rate > 5.0 {
        "✅ Good engagement rate - decent viewer interaction"
    } else {
        "⚠️ Low engagement rate - consider improving content appeal"
    })
}

// SEO & Discoverability

fn tag_coverage(ctx: &InsightContext) -> Option<&'static str> {
    Some(match ctx.tags_count {
        n if n > 10 => "✅ Excellent tag coverage - great for discoverability",
        n if n > 5 => "✅ Good tag coverage - helps with search visibility",
        n if n > 2 => "⚠️ Moderate tag coverage - consider adding more relevant tags",
        _ => "⚠️ Low tag coverage - add more tags for better discoverability",
    })
}

fn educational_keywords(ctx: &InsightContext) -> Option<&'static str> {
    ctx.title_mentions(EDUCATIONAL_KEYWORDS)
        .then_some("✅ Educational keywords in title - great for long-term views")
}

fn review_keywords(ctx: &InsightContext) -> Option<&'static str> {
    ctx.title_mentions(REVIEW_KEYWORDS)
        .then_some("✅ Review keywords in title - high engagement potential")
}

fn trending_keywords(ctx: &InsightContext) -> Option<&'static str> {
    ctx.title_mentions(TRENDING_KEYWORDS)
        .then_some("✅ Trending keywords in title - good for current relevance")
}

// Performance Insights

fn performance_band(ctx: &InsightContext) -> Option<&'static str> {
    let views = ctx.best_prediction;
    Some(if views > 50_000.0 {
        "🚀 HIGH VIRAL POTENTIAL - This could be a breakout video!"
    } else if views > 20_000.0 {
        "📈 STRONG PERFORMANCE - Expected to perform very well"
    } else if views > 10_000.0 {
        "✅ GOOD PERFORMANCE - Solid view count expected"
    } else if views > 5_000.0 {
        "📊 MODERATE PERFORMANCE - Decent view count expected"
    } else {
        "⚠️ LOW PERFORMANCE - May need optimization"
    })
}

fn model_agreement(ctx: &InsightContext) -> Option<&'static str> {
    ctx.agreement.map(|agreement| match agreement.level {
        AgreementLevel::High => "✅ High model agreement - prediction is very reliable",
        AgreementLevel::Good => "✅ Good model agreement - prediction is reliable",
        AgreementLevel::Mixed => "⚠️ Mixed model predictions - consider multiple scenarios",
    })
}

// Improvement Recommendations

fn duration_advice(ctx: &InsightContext) -> Option<&'static str> {
    if ctx.duration_minutes < 10.0 {
        Some("💡 Consider extending content to 10-15 minutes for better retention")
    } else if ctx.duration_minutes > 25.0 {
        Some("💡 Consider breaking into shorter segments or series")
    } else {
        None
    }
}

fn title_advice(ctx: &InsightContext) -> Option<&'static str> {
    (ctx.title_length < 30).then_some("💡 Add more descriptive keywords to title for better SEO")
}

fn description_advice(ctx: &InsightContext) -> Option<&'static str> {
    (ctx.description_length < 100)
        .then_some("💡 Expand description with timestamps, key points, and call-to-action")
}

fn tags_advice(ctx: &InsightContext) -> Option<&'static str> {
    (ctx.tags_count < 8).then_some("💡 Add more relevant tags (aim for 8-15 tags)")
}

fn timing_advice(ctx: &InsightContext) -> Option<&'static str> {
    (!ctx.is_weekend && ctx.upload_hour < 14)
        .then_some("💡 Consider uploading between 2-6 PM on weekdays for better reach")
}

fn engagement_advice(ctx: &InsightContext) -> Option<&'static str> {
    (ctx.like_ratio < 0.8).then_some("💡 Focus on creating more engaging, valuable content")
}

fn content_type_advice(ctx: &InsightContext) -> Option<&'static str> {
    if ctx.title_mentions(&["tutorial", "how to"]) {
        Some("💡 For tutorials: Add clear step-by-step structure and timestamps")
    } else if ctx.title_mentions(&["review"]) {
        Some("💡 For reviews: Include pros/cons, rating, and comparison with alternatives")
    } else if ctx.title_mentions(&["gaming", "game"]) {
        Some("💡 For gaming: Focus on exciting moments and clear commentary")
    } else {
        None
    }
}
