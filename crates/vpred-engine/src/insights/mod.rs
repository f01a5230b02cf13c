//! Rule-based insight generation.

mod rules;

pub use rules::{InsightContext, Rule, EDUCATIONAL_KEYWORDS, REVIEW_KEYWORDS, TRENDING_KEYWORDS};

use tracing::debug;
use vpred_models::{InsightCategory, InsightReport, ModelEstimate, VideoMetadata};

use crate::confidence;

/// Evaluates the per-category rule tables over metadata and predictions.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightGenerator;

impl InsightGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build the six-category report.
    ///
    /// Every category holds at least one message: when no rule fires, the
    /// category gets its neutral placeholder.
    pub fn generate(
        &self,
        meta: &VideoMetadata,
        predictions: &[ModelEstimate],
        best_prediction: f64,
    ) -> InsightReport {
        let values: Vec<f64> = predictions.iter().map(|e| e.views).collect();
        let ctx = InsightContext::new(meta, best_prediction, confidence::model_agreement(&values));
        self.generate_from(&ctx)
    }

    pub fn generate_from(&self, ctx: &InsightContext) -> InsightReport {
        let mut report = InsightReport::new();

        for category in InsightCategory::ALL {
            let mut messages: Vec<String> = rules::rules_for(category)
                .iter()
                .filter_map(|rule| rule(ctx))
                .map(str::to_string)
                .collect();

            if messages.is_empty() {
                messages.push(rules::placeholder(category).to_string());
            }

            debug!(category = %category, count = messages.len(), "Insight rules evaluated");
            report.insert(category, messages);
        }

        report
    }
}
