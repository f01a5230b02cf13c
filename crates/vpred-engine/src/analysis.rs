//! Display-oriented analysis: key factors, quick recommendations, and the
//! formatted video summary.

use vpred_models::{PerformanceTier, PredictionResult, VideoMetadata, VideoSummary};

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Below this point prediction, discoverability suggestions are added.
const DISCOVERABILITY_THRESHOLD_VIEWS: f64 = 50_000.0;

/// Headline factors expected to affect the prediction.
pub fn key_factors(meta: &VideoMetadata) -> Vec<String> {
    let mut factors = Vec::new();
    let title = meta.title.to_lowercase();

    if meta.duration > 1800 {
        factors.push("Long-form content (good for educational videos)");
    } else if meta.duration < 300 {
        factors.push("Short-form content (good for entertainment)");
    }

    if meta.like_count > 1000 {
        factors.push("High engagement potential");
    }

    if title.contains("tutorial") || title.contains("how to") {
        factors.push("Educational content (good for long-term views)");
    }

    if title.contains("funny") || title.contains("compilation") {
        factors.push("Entertainment content (good for immediate views)");
    }

    if factors.is_empty() {
        factors.push("Standard content factors");
    }

    factors.into_iter().map(str::to_string).collect()
}

/// Short list of the most actionable suggestions.
pub fn recommendations(meta: &VideoMetadata, predicted_views: f64) -> Vec<String> {
    let mut recs = Vec::new();

    if predicted_views < DISCOVERABILITY_THRESHOLD_VIEWS {
        recs.push("Consider optimizing title for better discoverability");
        recs.push("Add more engaging thumbnail");
        recs.push("Improve video description with keywords");
    }

    if meta.duration > 2400 {
        recs.push("Consider breaking into shorter segments");
    }

    if meta.like_count < 100 {
        recs.push("Focus on improving content engagement");
    }

    if recs.is_empty() {
        recs.push("Content looks good - no major changes needed");
    }

    recs.into_iter().map(str::to_string).collect()
}

/// Build the display summary for a video and its prediction.
pub fn summarize(meta: &VideoMetadata, prediction: &PredictionResult) -> VideoSummary {
    let tier = PerformanceTier::from_views(prediction.best_prediction);

    VideoSummary {
        title: meta.title.clone(),
        description: preview(&meta.description, DESCRIPTION_PREVIEW_CHARS),
        duration: format_duration(meta.duration),
        upload_date: meta.upload_date().format("%Y-%m-%d").to_string(),
        tags: meta.tags.clone(),
        predicted_views: format_thousands(prediction.best_prediction),
        confidence_range: format!(
            "{} - {}",
            format_thousands(prediction.confidence_lower),
            format_thousands(prediction.confidence_upper)
        ),
        prediction_quality: prediction.confidence_level,
        performance_tier: tier,
        expected_performance: tier.description().to_string(),
        key_factors: key_factors(meta),
        recommendations: recommendations(meta, prediction.best_prediction),
    }
}

/// Truncate to `max_chars` characters, appending `...` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Seconds as `M:SS`.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Whole number with `,` thousands separators (fraction truncated).
pub fn format_thousands(value: f64) -> String {
    let whole = if value.is_finite() { value.trunc() as i128 } else { 0 };
    let digits = whole.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if whole < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
