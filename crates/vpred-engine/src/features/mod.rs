//! Feature engineering.
//!
//! Raw metadata is turned into the canonical 21-feature set by
//! [`FeatureExtractor`], then aligned to whatever schema the loaded model was
//! fitted with by [`reconcile`].

mod extractor;
mod schema;

pub use extractor::{ExtractedFeatures, FeatureExtractor};
pub use schema::reconcile;
