//! Image upload handler.

use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::MultipartError,
    },
    http::{HeaderMap, StatusCode},
};
use serde_json::{Value, json};

use crate::{
    error::{AppError, UploadError},
    services::credential_service::{self, Verdict},
    state::AppState,
};

/// Request body cap for the upload route. Larger than the 5 MiB file limit
/// so oversized files are answered with a 400 rather than cut off.
pub const UPLOAD_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Upload an image.
///
/// # Endpoint
///
/// `POST /api/upload`, `multipart/form-data` with a `file` field.
///
/// # Authentication
///
/// The gate lets this path through; the credential is verified here.
///
/// # Response
///
/// ```json
/// { "success": true, "path": "/uploads/6f1d...c2.png" }
/// ```
///
/// - 401: missing or invalid credential
/// - 400: no file, file over 5 MiB, or not an image
/// - 500: the file could not be written
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let token = credential_service::token_from_headers(&headers);
    if state.credentials.verify(token.as_deref()) != Verdict::Authorized {
        return Err(AppError::Unauthorized);
    }

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let mime_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(multipart_error)?;

        let path = state.uploads.store(&bytes, &file_name, &mime_type).await?;
        return Ok(Json(json!({ "success": true, "path": path })));
    }

    Err(UploadError::NoFile.into())
}

/// Bodies cut off at the route's size cap are reported as oversized files.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge.into()
    } else {
        AppError::Validation(format!("Invalid upload body: {e}"))
    }
}
