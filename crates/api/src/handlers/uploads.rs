//! Handler for binary image uploads.
//!
//! Uploaded files are stored under the configured upload directory keyed
//! by their client-supplied filename (overwrite on collision) and served
//! back at `/images/{filename}`. This is deliberately independent of the
//! `ItemImage` records, which hold arbitrary URLs.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Typed response for the upload endpoint.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Relative URL the uploaded file is served at.
    pub image_url: String,
}

// ---------------------------------------------------------------------------
// POST /upload-image
// ---------------------------------------------------------------------------

/// Accept a multipart upload and persist the first file field.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let Some(original_name) = field.file_name().map(ToOwned::to_owned) else {
            // Not a file field; skip.
            continue;
        };

        // Keep only the final path component so the file lands inside the
        // upload directory whatever the client sent.
        let filename = std::path::Path::new(&original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .map(ToOwned::to_owned)
            .ok_or_else(|| {
                AppError::BadRequest(format!("Invalid upload filename '{original_name}'"))
            })?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload body: {e}")))?;

        let dest = state.config.upload_dir.join(&filename);
        tokio::fs::write(&dest, &data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        tracing::info!(filename = %filename, bytes = data.len(), "Image uploaded");

        return Ok(Json(UploadResponse {
            image_url: format!("/images/{filename}"),
        }));
    }

    Err(AppError::BadRequest(
        "Multipart body contained no file field".to_string(),
    ))
}
