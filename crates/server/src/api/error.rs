//! Mapping of queue failures onto HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use queuedesk_core::QueueError;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Invalid request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("Invalid path: {0}")]
    Path(#[from] PathRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Queue(QueueError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Queue(QueueError::InvalidInput(_) | QueueError::InvalidState(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Queue(QueueError::Persistence(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(_) | ApiError::Path(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        let status = self.status();
        let error = match &self {
            ApiError::Queue(QueueError::Persistence(_)) => "Internal storage error".to_string(),
            _ => self.to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
