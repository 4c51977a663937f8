//! # Admin Content API
//!
//! - **GET `/api/admin/content`**: the full document, with its revision as
//!   the `ETag` header.
//! - **POST / PUT `/api/admin/content`**: replace the whole document.
//! - **PATCH `/api/admin/content`**: replace the named top-level sections.
//!
//! Writes accept an optional `If-Match` revision; a stale one is rejected
//! with 409. Invalid content is rejected with 422 and one message per
//! violation in `details.errors`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use parsa_core::{ContentDocument, ContentPatch};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::{etag, extract_json, if_match};
use crate::routes::run_blocking;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplaceResponse {
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PatchResponse {
    pub success: bool,
    pub content: ContentDocument,
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/admin/content",
        get(get_content)
            .post(replace_content)
            .put(replace_content)
            .patch(patch_content),
    )
}

async fn get_content(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let (document, revision) = state.store.load_with_revision()?;
    Ok(([etag(&revision)], Json(document)))
}

async fn replace_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let expected = if_match(&headers)?;
    let value = extract_json(body)?;
    let store = Arc::clone(&state.store);
    let revision =
        run_blocking(move || Ok(store.replace_value(&value, expected.as_deref())?)).await?;
    Ok(([etag(&revision)], Json(ReplaceResponse { success: true })))
}

async fn patch_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ContentPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let expected = if_match(&headers)?;
    let patch = extract_json(body)?;
    let store = Arc::clone(&state.store);
    let (content, revision) = run_blocking(move || {
        Ok(match expected {
            Some(revision) => store.patch_if_match(patch, &revision)?,
            None => store.patch(patch)?,
        })
    })
    .await?;
    Ok((
        [etag(&revision)],
        Json(PatchResponse {
            success: true,
            content,
        }),
    ))
}
