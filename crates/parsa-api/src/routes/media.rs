//! # Media Upload
//!
//! **POST `/api/admin/media/upload`** takes one multipart field named
//! `file`. Accepted types are JPEG, PNG, WebP and GIF up to the configured
//! size. The response carries the public URL to put into content.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::routes::run_blocking;
use crate::state::AppState;

/// Room for multipart framing on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub filename: String,
}

pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new().route(
        "/api/admin/media/upload",
        post(upload).layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(MULTIPART_OVERHEAD),
        )),
    )
}

async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        let media = Arc::clone(&state.media);
        let stored =
            run_blocking(move || Ok(media.store(&original_name, &content_type, &bytes)?)).await?;
        return Ok(Json(UploadResponse {
            success: true,
            url: stored.url,
            filename: stored.filename,
        }));
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
