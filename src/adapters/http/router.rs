//! Router setup with all API routes and middleware.

use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::{header, HeaderValue, Method, StatusCode};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::chat::chat_routes;
use super::error::ApiError;
use super::state::AppState;
use super::user::user_routes;
use crate::config::ServerConfig;

/// Create the axum Router with all routes and middleware.
///
/// Requests exceeding `server.request_timeout_secs` are answered with a
/// `408` JSON [`ErrorResponse`](super::ErrorResponse).
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(user_routes())
        .merge(chat_routes())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(map_response(timeout_as_json))
        .layer(cors_layer(server))
        .with_state(state)
}

/// GET /health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// The timeout layer answers with an empty `408`; give it the usual error body.
async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!("Request exceeded the configured timeout");
        return ApiError::Timeout.into_response();
    }
    response
}

/// Configured origins, or any origin when none are configured.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::InMemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router(server: &ServerConfig) -> Router {
        let state = AppState::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(MockAIProvider::new()),
        );
        app_router(state, server)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let response = router(&ServerConfig::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn configured_origin_is_allowed() {
        let server = ServerConfig {
            cors_origins: Some("http://localhost:8081".to_string()),
            ..Default::default()
        };

        let response = router(&server)
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://localhost:8081")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:8081"))
        );
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = router(&ServerConfig::default())
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
