//! View prediction engine.
//!
//! This crate provides:
//! - Feature extraction from validated video metadata, with schema
//!   reconciliation against a fitted model's column order
//! - Ensemble prediction over a read-only model bundle
//! - Confidence bands and model agreement
//! - Rule-based insights, key factors and recommendations
//! - The [`Predictor`] pipeline tying them together

pub mod analysis;
pub mod clock;
pub mod confidence;
pub mod config;
pub mod ensemble;
pub mod error;
pub mod features;
pub mod insights;
pub mod loader;
pub mod metrics;
pub mod pipeline;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::PredictorConfig;
pub use ensemble::{ModelBundle, Regressor, RegressorSpec, StandardScaler};
pub use error::{PredictError, PredictResult};
pub use features::{ExtractedFeatures, FeatureExtractor};
pub use insights::InsightGenerator;
pub use loader::{BundleDocument, JsonBundleLoader, ModelLoader};
pub use pipeline::Predictor;
