//! Application error types and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Top-level application error type.
///
/// Write-path rejections carry the human-readable reason that ends up in
/// the `{"response": ...}` payload. Read-path variants (`NotFound`,
/// `Corrupt`, `Io`) never reach clients on the view route, which degrades
/// to an empty rendering instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("you need to wait {minutes} minutes before creating a new paste")]
    RateLimited { minutes: u64 },

    #[error("request must be encoded using JSON")]
    MalformedRequest,

    #[error("request must contain a file list")]
    MissingFileList,

    #[error("request must contain a valid application reference")]
    InvalidApplication,

    #[error("Missing file content for file {0}")]
    MissingFileContent(String),

    #[error("failed to store paste")]
    StorageFailure,

    #[error("paste {0} already exists")]
    AlreadyExists(String),

    #[error("Not found")]
    NotFound,

    #[error("corrupt paste record: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
            AppError::MalformedRequest
            | AppError::MissingFileList
            | AppError::InvalidApplication
            | AppError::MissingFileContent(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::StorageFailure => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            AppError::AlreadyExists(_) | AppError::Corrupt(_) | AppError::Io(_) => {
                tracing::error!("internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    AppError::StorageFailure.to_string(),
                )
            }
        };

        (status, Json(json!({ "response": message }))).into_response()
    }
}
