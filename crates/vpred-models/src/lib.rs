//! Shared data models for the view prediction engine.
//!
//! This crate provides Serde-serializable types for:
//! - Raw and validated video metadata
//! - The fixed feature schema and reconciled feature vectors
//! - Prediction results, confidence bands and model agreement
//! - Categorized insight reports and human-readable summaries

pub mod features;
pub mod insight;
pub mod metadata;
pub mod prediction;
pub mod report;
pub mod summary;

// Re-export common types
pub use features::{FeatureName, FeatureVector, SchemaReport, FEATURE_COUNT};
pub use insight::{InsightCategory, InsightReport};
pub use metadata::{MetadataError, VideoMetadata, VideoMetadataInput};
pub use prediction::{
    AgreementLevel, ConfidenceInterval, ConfidenceLevel, ModelAgreement, ModelEstimate,
    PredictionResult, PredictionSource,
};
pub use report::{PredictionOutcome, PredictionReport};
pub use summary::{PerformanceTier, VideoSummary};
