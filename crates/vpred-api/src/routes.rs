//! API routes.

use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{get_schema, health, predict, ready};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let api_routes = Router::new()
        .route("/predict", post(predict))
        .route("/schema", get(get_schema));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health))
        .route("/ready", get(ready));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout,
        ))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use vpred_engine::ensemble::ConstantRegressor;
    use vpred_engine::{ModelBundle, Predictor, PredictorConfig, StandardScaler};
    use vpred_models::FeatureName;

    use crate::config::ApiConfig;

    fn bundle() -> ModelBundle {
        let names = FeatureName::canonical_names();
        let width = names.len();
        ModelBundle::new(names, false)
            .with_scaler(StandardScaler::identity(width))
            .unwrap()
            .with_model("gradient_boosting", Arc::new(ConstantRegressor { value: 150_000.0 }))
            .with_model("random_forest", Arc::new(ConstantRegressor { value: 140_000.0 }))
    }

    fn app(bundle: Option<ModelBundle>) -> Router {
        let config = ApiConfig::default();
        let predictor = Predictor::new(PredictorConfig::default(), bundle);
        create_router(AppState::with_predictor(config, predictor), None)
    }

    fn predict_request(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/predict")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn tutorial() -> Value {
        json!({
            "title": "Complete Python Tutorial for Beginners",
            "description": "Learn Python programming from scratch",
            "duration": 900,
            "like_count": 1250,
            "dislike_count": 45,
            "upload_date": "2024-01-15",
            "tags": "python,tutorial,programming,beginners,coding"
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app(None)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_without_bundle_is_unavailable() {
        let response = app(None)
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_predict_with_bundle() {
        let response = app(Some(bundle()))
            .oneshot(predict_request(tutorial()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["prediction"]["status"], "predicted");
        assert_eq!(body["prediction"]["best_model"], "gradient_boosting");
        assert_eq!(body["prediction"]["confidence_level"], "High");
        assert_eq!(body["features"]["names"].as_array().unwrap().len(), 21);
        assert!(body["insights"]["Content Optimization"].is_array());
        assert_eq!(body["summary"]["predicted_views"], "150,000");
    }

    #[tokio::test]
    async fn test_predict_without_bundle_returns_partial_report() {
        let response = app(None).oneshot(predict_request(tutorial())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["prediction"]["status"], "unavailable");
        assert!(body["prediction"]["error"].as_str().unwrap().contains("Model unavailable"));
        assert_eq!(body["features"]["values"].as_array().unwrap().len(), 21);
        assert!(body.get("insights").is_none());
    }

    #[tokio::test]
    async fn test_predict_rejects_negative_duration() {
        let mut input = tutorial();
        input["duration"] = json!(-10);

        let response = app(Some(bundle())).oneshot(predict_request(input)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["field"], "duration");
        assert_eq!(body["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_predict_rejects_bad_date() {
        let mut input = tutorial();
        input["upload_date"] = json!("last tuesday");

        let response = app(None).oneshot(predict_request(input)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["field"], "upload_date");
    }

    #[tokio::test]
    async fn test_predict_rejects_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/predict")
            .header("content-type", "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap();

        let response = app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_type_error_names_field() {
        let mut input = tutorial();
        input["duration"] = json!("fifteen minutes");

        let response = app(None).oneshot(predict_request(input)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["field"], "duration");
        assert_eq!(body["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_predict_missing_field_names_field() {
        let mut input = tutorial();
        input.as_object_mut().unwrap().remove("upload_date");

        let response = app(None).oneshot(predict_request(input)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["field"], "upload_date");
    }

    #[tokio::test]
    async fn test_schema_lists_bundle_models() {
        let response = app(Some(bundle()))
            .oneshot(Request::builder().uri("/api/schema").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["models"], json!(["gradient_boosting", "random_forest"]));
        assert_eq!(body["canonical_model"], "gradient_boosting");
        assert_eq!(body["feature_names"][0], "duration");
        assert!(body["input_schema"]["properties"]["upload_date"].is_object());
    }
}
