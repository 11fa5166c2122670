//! Axum router configuration

use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::handlers::{
    download_captions, get_metadata, health_check, object_created, store_captions,
};

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors_enabled = state.config.cors_enabled;

    let mut router = Router::new()
        // Health endpoint
        .route("/health", get(health_check))
        // Caption API
        .route("/v1/metadata", get(get_metadata))
        .route("/v1/captions", post(download_captions))
        .route("/v2/captions", post(store_captions))
        // Storage event trigger
        .route("/events/object-created", post(object_created))
        // Middleware
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::ACCEPT, header::CONTENT_TYPE, header::ORIGIN])
            .max_age(Duration::from_secs(3600));
        router = router.layer(cors);
    }

    router.with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt; // for oneshot

    fn test_app() -> Router {
        app_with_config(ServerConfig::default())
    }

    fn app_with_config(config: ServerConfig) -> Router {
        let state = Arc::new(AppState::from_config(config));
        create_router(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "status": "OK" }));
    }

    #[tokio::test]
    async fn test_metadata_requires_url() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/v1/metadata")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn test_store_captions_requires_url() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/v2/captions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_store_captions_unsupported_url() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/v2/captions?url=https://vimeo.com/123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("Unsupported video URL"));
    }

    #[tokio::test]
    async fn test_event_always_acknowledged() {
        // Processing fails (the object does not exist) but the event is
        // still acknowledged with 200.
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/events/object-created")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"bucket":"videos","name":"missing.vtt"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "status": "accepted" }));
    }

    #[tokio::test]
    async fn test_event_missing_fields_rejected() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/events/object-created")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"bucket":"videos"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("name"));
    }

    #[tokio::test]
    async fn test_captions_body_missing_field_rejected_as_json() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/v1/captions")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"url":"https://youtu.be/a"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("output_dir"));
    }

    #[tokio::test]
    async fn test_captions_missing_body_rejected_as_json() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/v1/captions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn test_cors_enabled_by_default() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_cors_disabled() {
        let mut config = ServerConfig::default();
        config.cors_enabled = false;

        let response = app_with_config(config)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
