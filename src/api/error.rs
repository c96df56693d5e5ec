//! API error responses

use crate::schedule::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Day selection rejected by the tenant's policy
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request body made sense as JSON but not as a request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Settings store failure
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(ValidationError::CountMismatch { required, actual }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": self.to_string(),
                    "required": required,
                    "actual": actual,
                }),
            ),
            ApiError::Validation(ValidationError::EmptySelection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": self.to_string(), "actual": 0 }),
            ),
            ApiError::BadRequest(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string() }),
            ),
            ApiError::Storage(e) => {
                error!("Settings store error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to access tenant settings" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
