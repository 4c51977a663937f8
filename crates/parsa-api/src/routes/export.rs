//! # Content Export Download
//!
//! **GET `/api/admin/content/export`** packages the current content as a
//! zip archive. Query parameters `format` (`json` | `source`),
//! `include_media` and `optimize_images` override the defaults.
//!
//! Media is gathered from the media directory: every reference in the
//! document that names a local file is packaged. Remote URLs are left as
//! references. Export notices are returned as `X-Export-Notice` headers.

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use parsa_export::{ContentExporter, ExportFormat, ExportOptions};
use serde::Deserialize;

use crate::error::AppError;
use crate::routes::run_blocking;
use crate::state::AppState;

const EXPORT_NOTICE: &str = "x-export-notice";

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<ExportFormat>,
    pub include_media: Option<bool>,
    pub optimize_images: Option<bool>,
}

impl ExportQuery {
    fn options(&self) -> ExportOptions {
        let defaults = ExportOptions::default();
        ExportOptions {
            include_media: self.include_media.unwrap_or(defaults.include_media),
            optimize_images: self.optimize_images.unwrap_or(defaults.optimize_images),
            format: self.format.unwrap_or(defaults.format),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/admin/content/export", get(export_content))
}

async fn export_content(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let options = query.options();
    let archive = run_blocking(move || {
        let document = state.store.load()?;
        let mut exporter = ContentExporter::from_document(&document, state.validator())?
            .with_product_name(state.config.product_name.clone());
        if options.include_media {
            for (url, bytes) in state.media.gather(document.media_references()) {
                exporter.add_media_file(url, bytes);
            }
        }
        Ok(exporter.export(&options)?)
    })
    .await?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/zip"));
    let disposition = format!("attachment; filename=\"{}\"", archive.filename);
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition).map_err(|e| AppError::Internal(e.to_string()))?,
    );
    for notice in &archive.notices {
        if let Ok(value) = HeaderValue::from_str(notice) {
            headers.append(EXPORT_NOTICE, value);
        }
    }

    Ok((headers, archive.data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_match_export_defaults() {
        assert_eq!(ExportQuery::default().options(), ExportOptions::default());
    }

    #[test]
    fn query_overrides() {
        let query = ExportQuery {
            format: Some(ExportFormat::Source),
            include_media: Some(false),
            optimize_images: None,
        };
        let options = query.options();
        assert_eq!(options.format, ExportFormat::Source);
        assert!(!options.include_media);
        assert!(options.optimize_images);
    }
}
