//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Failures of the content document file.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("content file not found")]
    Missing,

    #[error("content file is not valid content JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("failed to read content file: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to write content file: {0}")]
    Write(#[source] std::io::Error),

    #[error("failed to serialize content: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Rejections from the asset uploader.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("No file provided.")]
    NoFile,

    #[error("File is too large (max 5MB).")]
    TooLarge,

    #[error("Invalid file type. Only images are allowed.")]
    InvalidType,

    #[error("failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Configuration Errors**: A required secret is missing
/// - **Authentication Errors**: Wrong password, missing or invalid credential
/// - **Rate Limit Errors**: Too many login attempts from one caller
/// - **Validation Errors**: Invalid request data, rejected before any write
/// - **Storage Errors**: The content file could not be read or written
/// - **Upload Errors**: Oversized or non-image uploads
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Server is missing configuration it needs for this operation.
    ///
    /// Returns HTTP 500.
    #[error("Server configuration error: {0}")]
    Configuration(String),

    /// Login with the wrong password.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid password")]
    InvalidPassword,

    /// Credential missing, malformed, tampered or expired.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Unauthorized")]
    Unauthorized,

    /// Too many login attempts within the window.
    ///
    /// Returns HTTP 429 Too Many Requests.
    #[error("Too many login attempts. Please try again later.")]
    RateLimited,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    Validation(String),

    /// Targeted record does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("{0} not found")]
    NotFound(String),

    /// Unknown cookie preference action.
    #[error("Invalid action")]
    InvalidAction,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// Storage and upload I/O failures are logged and hidden from the client.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Configuration(ref msg) => {
                tracing::error!(error = %msg, "server misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "server_misconfigured",
                    self.to_string(),
                )
            }
            AppError::InvalidPassword => (
                StatusCode::UNAUTHORIZED,
                "invalid_password",
                self.to_string(),
            ),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string())
            }
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                self.to_string(),
            ),
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::InvalidAction => {
                (StatusCode::BAD_REQUEST, "invalid_action", self.to_string())
            }
            AppError::Storage(ref err) => {
                tracing::error!(error = %err, "content storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Upload(ref err) => match err {
                UploadError::NoFile => (StatusCode::BAD_REQUEST, "no_file", err.to_string()),
                UploadError::TooLarge => {
                    (StatusCode::BAD_REQUEST, "file_too_large", err.to_string())
                }
                UploadError::InvalidType => {
                    (StatusCode::BAD_REQUEST, "invalid_file_type", err.to_string())
                }
                UploadError::Io(io) => {
                    tracing::error!(error = %io, "upload write failed");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "upload_failed",
                        "Something went wrong during the upload.".to_string(),
                    )
                }
            },
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
