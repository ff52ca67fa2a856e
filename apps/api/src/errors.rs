use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::controller::InterviewError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every error body is `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Interview(#[from] InterviewError),

    #[error("Invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Uploaded file is too large (limit is {0} bytes)")]
    PayloadTooLarge(usize),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(e) => e.status(),
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Interview(e) => match e {
                InterviewError::EmptyUpload | InterviewError::SessionNotFound => {
                    StatusCode::BAD_REQUEST
                }
                InterviewError::ExtractionFailed(_)
                | InterviewError::GenerationFailed(_)
                | InterviewError::MissingVariable(_)
                | InterviewError::DuplicateSession(_)
                | InterviewError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {self:?}");
        }

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}
