//! Confidence band and model-agreement estimation.
//!
//! The band is a fixed ±30% heuristic around the point prediction, not a
//! statistically fitted interval.

use vpred_models::{AgreementLevel, ConfidenceInterval, ConfidenceLevel, ModelAgreement};

pub const LOWER_FACTOR: f64 = 0.7;
pub const UPPER_FACTOR: f64 = 1.3;

/// Point predictions above this are labelled High.
pub const HIGH_CONFIDENCE_VIEWS: f64 = 100_000.0;
/// Point predictions above this are labelled Medium.
pub const MEDIUM_CONFIDENCE_VIEWS: f64 = 10_000.0;

pub const HIGH_AGREEMENT_CV: f64 = 0.10;
pub const GOOD_AGREEMENT_CV: f64 = 0.20;

/// Band and label for a point prediction.
pub fn estimate(point: f64) -> ConfidenceInterval {
    ConfidenceInterval {
        lower: point * LOWER_FACTOR,
        upper: point * UPPER_FACTOR,
        level: confidence_level(point),
    }
}

pub fn confidence_level(point: f64) -> ConfidenceLevel {
    if point > HIGH_CONFIDENCE_VIEWS {
        ConfidenceLevel::High
    } else if point > MEDIUM_CONFIDENCE_VIEWS {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

/// Population stdev / mean of the estimates; 0 when empty or the mean is 0.
pub fn coefficient_of_variation(estimates: &[f64]) -> f64 {
    if estimates.is_empty() {
        return 0.0;
    }

    let n = estimates.len() as f64;
    let mean = estimates.iter().sum::<f64>() / n;
    if mean <= 0.0 {
        return 0.0;
    }

    let variance = estimates.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean
}

/// Agreement across ensemble members; `None` with fewer than two estimates.
pub fn model_agreement(estimates: &[f64]) -> Option<ModelAgreement> {
    if estimates.len() < 2 {
        return None;
    }

    let cv = coefficient_of_variation(estimates);
    let level = if cv < HIGH_AGREEMENT_CV {
        AgreementLevel::High
    } else if cv < GOOD_AGREEMENT_CV {
        AgreementLevel::Good
    } else {
        AgreementLevel::Mixed
    };

    Some(ModelAgreement { cv, level })
}
