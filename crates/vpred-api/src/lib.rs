//! HTTP API and command-line surfaces for the view prediction engine.
//!
//! This crate provides:
//! - `POST /api/predict` returning a full prediction report
//! - `GET /api/schema` describing the feature and model schema in use
//! - Health/readiness probes and Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
