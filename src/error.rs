//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` so every failure has the `{"error": ...}` shape.

use crate::state::RegistryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Error returned by a service registry operation
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Request body was sent as JSON but could not be parsed
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Registry(RegistryError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Registry(RegistryError::InvalidId(_)) => StatusCode::BAD_REQUEST,
            AppError::Registry(RegistryError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::debug!(status = %status.as_u16(), error = %self, "Request rejected");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn response_parts(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let error = AppError::from(RegistryError::Validation("name is required".to_string()));
        let (status, body) = response_parts(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "name is required"}));
    }

    #[tokio::test]
    async fn test_invalid_id_response() {
        let error = AppError::from(RegistryError::InvalidId("abc".to_string()));
        let (status, body) = response_parts(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid id"}));
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let (status, body) = response_parts(RegistryError::NotFound("9".to_string()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Service not found"}));
    }

    #[tokio::test]
    async fn test_invalid_body_response() {
        let error = AppError::InvalidBody("expected value".to_string());
        let (status, body) = response_parts(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid request body: expected value"}));
    }
}
