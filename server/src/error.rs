//! API error responses
//!
//! Tagged errors distinguishing client-correctable validation problems
//! (400) from internal faults (500). Every error surfaces as a JSON body
//! of the shape `{"error": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use harvestcast::HarvestError;

/// JSON body returned for every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Errors a predict request can surface
#[derive(Error, Debug)]
pub enum ApiError {
    /// The required image file field was absent
    #[error("No image uploaded")]
    MissingImage,

    /// A numeric form field could not be parsed
    #[error("Invalid value '{value}' for field '{field}': expected a number")]
    InvalidField { field: String, value: String },

    /// The multipart body could not be read
    #[error("Malformed multipart request: {0}")]
    Malformed(String),

    /// Anything that went wrong server-side
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingImage | ApiError::InvalidField { .. } | ApiError::Malformed(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HarvestError> for ApiError {
    fn from(err: HarvestError) -> Self {
        match err {
            HarvestError::InvalidFeature { field, value } => ApiError::InvalidField { field, value },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("request failed: {}", self);
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_image_is_400_with_exact_body() {
        let response = ApiError::MissingImage.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({"error": "No image uploaded"}));
    }

    #[tokio::test]
    async fn test_invalid_field_is_400() {
        let response = ApiError::InvalidField {
            field: "temperature".to_string(),
            value: "abc".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_internal_is_500() {
        let response = ApiError::Internal("inference exploded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "inference exploded");
    }
}
