//! Error handling for the HTTP adapter.
//!
//! Application errors are converted to a JSON [`ErrorResponse`] with a status
//! code per error kind. Storage details are logged and never sent to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::{ConversationQueryError, ConverseError, UserError};

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

const INTERNAL_MESSAGE: &str = "Internal server error";

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Converse(ConverseError),
    ConversationQuery(ConversationQueryError),
    User(UserError),
    /// Request could not be decoded (malformed JSON, missing body).
    BadRequest(String),
    /// Request exceeded `server.request_timeout_secs`.
    Timeout,
}

impl From<ConverseError> for ApiError {
    fn from(err: ConverseError) -> Self {
        Self::Converse(err)
    }
}

impl From<ConversationQueryError> for ApiError {
    fn from(err: ConversationQueryError) -> Self {
        Self::ConversationQuery(err)
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        Self::User(err)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "Request timed out".to_string(),
            ),

            ApiError::Converse(ConverseError::Validation(e))
            | ApiError::ConversationQuery(ConversationQueryError::Validation(e))
            | ApiError::User(UserError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", e.to_string())
            }

            ApiError::Converse(err @ ConverseError::Provider(_)) => {
                (StatusCode::BAD_GATEWAY, "AI_PROVIDER_ERROR", err.to_string())
            }

            ApiError::User(err @ UserError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "USER_NOT_FOUND", err.to_string())
            }
            ApiError::User(err @ UserError::AlreadyExists { .. }) => {
                (StatusCode::CONFLICT, "USER_EXISTS", err.to_string())
            }

            ApiError::Converse(ConverseError::Store(e))
            | ApiError::ConversationQuery(ConversationQueryError::Store(e))
            | ApiError::User(UserError::Store(e)) => {
                tracing::error!(error = %e, "Request failed on storage");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = self.parts();
        (status, Json(ErrorResponse::new(error_code, message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;
    use crate::ports::{AIError, StoreError};

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::from(ConverseError::Validation(ValidationError::empty_field(
            "userId",
        )));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn provider_error_maps_to_502_with_detail() {
        let err = ApiError::from(ConverseError::Provider(AIError::status(429, "quota")));
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "AI_PROVIDER_ERROR");
        assert_eq!(
            message,
            "AI service error: AI API returned non-OK status 429: quota"
        );
    }

    #[test]
    fn store_error_hides_detail() {
        let err = ApiError::from(ConversationQueryError::Store(StoreError::database(
            "password authentication failed",
        )));
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "INTERNAL_ERROR");
        assert_eq!(message, INTERNAL_MESSAGE);
    }

    #[test]
    fn user_errors_map_to_404_and_409() {
        let not_found = ApiError::from(UserError::NotFound {
            email: "x@example.com".to_string(),
        });
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let exists = ApiError::from(UserError::AlreadyExists {
            email: "x@example.com".to_string(),
        });
        assert_eq!(exists.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn timeout_maps_to_408() {
        let (status, code, _) = ApiError::Timeout.parts();
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(code, "REQUEST_TIMEOUT");
    }

    #[test]
    fn error_response_serializes_camel_case() {
        let json = serde_json::to_value(ErrorResponse::new("BAD_REQUEST", "nope")).unwrap();
        assert_eq!(json, serde_json::json!({"errorCode": "BAD_REQUEST", "message": "nope"}));
    }
}
