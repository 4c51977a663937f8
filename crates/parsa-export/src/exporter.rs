//! # Content Exporter
//!
//! Packages a content document for redeployment:
//!
//! 1. Validate; an invalid document yields [`ExportError::Validation`] and
//!    no archive.
//! 2. Serialize as pretty JSON or as a generated source module.
//! 3. Add the content entry and a copy of the schema the validator was
//!    built from.
//! 4. Add supplied media under `public/images/`, passing images through the
//!    optimization step when requested.
//! 5. Add `IMPORT_INSTRUCTIONS.md` and `sync-content.sh`.
//! 6. Zip; the filename is `<product>-content-<YYYY-MM-DD>.zip`.
//!
//! Image optimization is not implemented: images are packaged unchanged.
//! When it is requested the archive carries a notice saying so, and a
//! warning is logged.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{Cursor, Write};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use parsa_core::{layout, ContentDocument, UnknownVariant};
use parsa_schema::ContentValidator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::artifacts;
use crate::error::ExportError;
use crate::source;

/// Product name used in archive filenames unless overridden.
pub const DEFAULT_PRODUCT_NAME: &str = "parsa-decor";

/// Serialization of the content entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `data/content.json`, pretty-printed.
    #[default]
    Json,
    /// `data/content.rs`, a generated module embedding the JSON.
    Source,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Source => "source",
        }
    }

    /// Archive entry holding the content in this format.
    pub fn content_entry(&self) -> &'static str {
        match self {
            Self::Json => layout::CONTENT_JSON,
            Self::Source => layout::CONTENT_SOURCE,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "source" => Ok(Self::Source),
            other => Err(UnknownVariant {
                kind: "export format",
                value: other.to_string(),
                expected: "json, source".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    pub include_media: bool,
    pub optimize_images: bool,
    pub format: ExportFormat,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_media: true,
            optimize_images: true,
            format: ExportFormat::Json,
        }
    }
}

/// A finished archive.
#[derive(Debug, Clone)]
pub struct ExportArchive {
    pub data: Vec<u8>,
    pub filename: String,
    /// Entry names in archive order.
    pub entries: Vec<String>,
    /// Things the caller should know about, e.g. skipped optimization.
    pub notices: Vec<String>,
}

/// Exporter over one content document plus its media blobs.
pub struct ContentExporter<'a> {
    content: Value,
    validator: &'a ContentValidator,
    product_name: String,
    media: BTreeMap<String, Vec<u8>>,
}

impl fmt::Debug for ContentExporter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentExporter")
            .field("product_name", &self.product_name)
            .field("media", &self.media.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<'a> ContentExporter<'a> {
    /// Exporter for an untyped document, validated at export time.
    pub fn new(content: Value, validator: &'a ContentValidator) -> Self {
        Self {
            content,
            validator,
            product_name: DEFAULT_PRODUCT_NAME.to_string(),
            media: BTreeMap::new(),
        }
    }

    pub fn from_document(
        document: &ContentDocument,
        validator: &'a ContentValidator,
    ) -> Result<Self, ExportError> {
        Ok(Self::new(serde_json::to_value(document)?, validator))
    }

    pub fn with_product_name(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = product_name.into();
        self
    }

    /// Register a media blob under the reference the content uses for it.
    /// A second blob for the same reference replaces the first.
    pub fn add_media_file(&mut self, url: impl Into<String>, bytes: Vec<u8>) {
        self.media.insert(url.into(), bytes);
    }

    pub fn media_count(&self) -> usize {
        self.media.len()
    }

    pub fn export(&self, options: &ExportOptions) -> Result<ExportArchive, ExportError> {
        self.export_at(options, Utc::now())
    }

    /// Export as of `now`, which dates the filename and the generated source.
    pub fn export_at(
        &self,
        options: &ExportOptions,
        now: DateTime<Utc>,
    ) -> Result<ExportArchive, ExportError> {
        let report = self.validator.validate(&self.content)?;
        if !report.is_valid() {
            tracing::warn!(violations = report.len(), "refusing to export invalid content");
            return Err(ExportError::Validation {
                errors: report.messages(),
            });
        }

        let json = serde_json::to_string_pretty(&self.content)?;
        let content_entry = options.format.content_entry();
        let payload = match options.format {
            ExportFormat::Json => json,
            ExportFormat::Source => source::render(&json, now),
        };

        let mut builder = ArchiveBuilder::new();
        builder.add(content_entry, payload.as_bytes())?;
        builder.add(layout::CONTENT_SCHEMA, self.validator.schema_source().as_bytes())?;

        let mut notices = Vec::new();
        let mut media_count = 0;
        if options.include_media {
            let mut names = BTreeSet::new();
            let mut passed_through = 0;
            for (url, bytes) in &self.media {
                let Some(file_name) = layout::media_file_name(url) else {
                    tracing::warn!(url = %url, "media reference has no usable file name, skipping");
                    notices.push(format!("Skipped {url}: no usable file name"));
                    continue;
                };
                if !names.insert(file_name.clone()) {
                    tracing::warn!(url = %url, file = %file_name, "media file name already packaged, skipping");
                    notices.push(format!(
                        "Skipped {url}: another media file is already packaged as {file_name}"
                    ));
                    continue;
                }
                let data = if options.optimize_images && layout::is_image(&file_name) {
                    passed_through += 1;
                    optimize_image(bytes)
                } else {
                    bytes.as_slice()
                };
                builder.add(&layout::media_entry(&file_name), data)?;
                media_count += 1;
            }
            if passed_through > 0 {
                tracing::warn!(
                    images = passed_through,
                    "image optimization is not implemented; images packaged unchanged"
                );
                notices.push(format!(
                    "Image optimization is not implemented: {passed_through} image(s) were packaged unchanged"
                ));
            }
        }

        builder.add(
            layout::IMPORT_INSTRUCTIONS,
            artifacts::import_instructions(&self.product_name, content_entry, media_count)
                .as_bytes(),
        )?;
        builder.add_executable(layout::SYNC_SCRIPT, artifacts::sync_script(content_entry).as_bytes())?;

        let (data, entries) = builder.finish()?;
        let filename = format!("{}-content-{}.zip", self.product_name, now.format("%Y-%m-%d"));
        tracing::info!(
            filename = %filename,
            format = %options.format,
            entries = entries.len(),
            size = data.len(),
            "content exported"
        );

        Ok(ExportArchive {
            data,
            filename,
            entries,
            notices,
        })
    }
}

/// Placeholder for image recompression. Returns the input unchanged.
fn optimize_image(bytes: &[u8]) -> &[u8] {
    bytes
}

struct ArchiveBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    entries: Vec<String>,
}

impl ArchiveBuilder {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            entries: Vec::new(),
        }
    }

    fn options() -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
    }

    fn add(&mut self, name: &str, data: &[u8]) -> Result<(), ExportError> {
        self.add_with(name, data, Self::options())
    }

    fn add_executable(&mut self, name: &str, data: &[u8]) -> Result<(), ExportError> {
        self.add_with(name, data, Self::options().unix_permissions(0o755))
    }

    fn add_with(
        &mut self,
        name: &str,
        data: &[u8],
        options: SimpleFileOptions,
    ) -> Result<(), ExportError> {
        self.zip.start_file(name, options)?;
        self.zip.write_all(data)?;
        self.entries.push(name.to_string());
        Ok(())
    }

    fn finish(self) -> Result<(Vec<u8>, Vec<String>), ExportError> {
        let cursor = self.zip.finish()?;
        Ok((cursor.into_inner(), self.entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use parsa_core::testing::sample_document;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn format_parses_and_displays() {
        assert_eq!("source".parse::<ExportFormat>().unwrap(), ExportFormat::Source);
        assert_eq!(ExportFormat::Json.to_string(), "json");
        assert!("typescript".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn default_options() {
        let options = ExportOptions::default();
        assert!(options.include_media);
        assert!(options.optimize_images);
        assert_eq!(options.format, ExportFormat::Json);
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: ExportOptions =
            serde_json::from_str(r#"{"format": "source", "includeMedia": false}"#).unwrap();
        assert_eq!(options.format, ExportFormat::Source);
        assert!(!options.include_media);
        assert!(options.optimize_images);
    }

    #[test]
    fn filename_uses_product_and_date() {
        let validator = ContentValidator::new().unwrap();
        let exporter = ContentExporter::from_document(&sample_document(), &validator)
            .unwrap()
            .with_product_name("atelier");
        let archive = exporter.export_at(&ExportOptions::default(), now()).unwrap();
        assert_eq!(archive.filename, "atelier-content-2026-03-14.zip");
    }

    #[test]
    fn entries_in_archive_order() {
        let validator = ContentValidator::new().unwrap();
        let mut exporter = ContentExporter::from_document(&sample_document(), &validator).unwrap();
        exporter.add_media_file("/images/hero-1.jpg", b"jpeg".to_vec());
        let archive = exporter.export_at(&ExportOptions::default(), now()).unwrap();
        assert_eq!(
            archive.entries,
            vec![
                "data/content.json",
                "data/content-schema.json",
                "public/images/hero-1.jpg",
                "IMPORT_INSTRUCTIONS.md",
                "sync-content.sh",
            ]
        );
    }

    #[test]
    fn optimization_notice_only_when_images_pass_through() {
        let validator = ContentValidator::new().unwrap();
        let mut exporter = ContentExporter::from_document(&sample_document(), &validator).unwrap();
        exporter.add_media_file("/images/tour.mp4", b"video".to_vec());
        let archive = exporter.export_at(&ExportOptions::default(), now()).unwrap();
        assert!(archive.notices.is_empty());

        exporter.add_media_file("/images/hero-1.jpg", b"jpeg".to_vec());
        let archive = exporter.export_at(&ExportOptions::default(), now()).unwrap();
        assert_eq!(archive.notices.len(), 1);
        assert!(archive.notices[0].contains("1 image(s)"));

        let options = ExportOptions {
            optimize_images: false,
            ..Default::default()
        };
        assert!(exporter.export_at(&options, now()).unwrap().notices.is_empty());
    }

    #[test]
    fn colliding_file_names_are_packaged_once() {
        let validator = ContentValidator::new().unwrap();
        let mut exporter = ContentExporter::from_document(&sample_document(), &validator).unwrap();
        exporter.add_media_file("/images/a/room.jpg", b"one".to_vec());
        exporter.add_media_file("/images/b/room.jpg", b"two".to_vec());
        let archive = exporter.export_at(&ExportOptions::default(), now()).unwrap();
        let media: Vec<_> = archive
            .entries
            .iter()
            .filter(|e| e.starts_with("public/images/"))
            .collect();
        assert_eq!(media, vec!["public/images/room.jpg"]);
        assert!(archive.notices.iter().any(|n| n.contains("/images/b/room.jpg")));
    }

    #[test]
    fn unusable_media_names_are_skipped_and_queries_dropped() {
        let validator = ContentValidator::new().unwrap();
        let mut exporter = ContentExporter::from_document(&sample_document(), &validator).unwrap();
        exporter.add_media_file("/images/..", b"up".to_vec());
        exporter.add_media_file("/images/", b"empty".to_vec());
        exporter.add_media_file("/images/hall.jpg?v=2", b"hall".to_vec());
        let archive = exporter.export_at(&ExportOptions::default(), now()).unwrap();
        let media: Vec<_> = archive
            .entries
            .iter()
            .filter(|e| e.starts_with("public/images/"))
            .collect();
        assert_eq!(media, vec!["public/images/hall.jpg"]);
        assert!(archive.notices.iter().any(|n| n.contains("/images/..")));
        assert!(archive
            .notices
            .iter()
            .any(|n| n == "Skipped /images/: no usable file name"));
    }

    #[test]
    fn non_object_content_is_export_failure() {
        let validator = ContentValidator::new().unwrap();
        let exporter = ContentExporter::new(Value::Null, &validator);
        let err = exporter.export_at(&ExportOptions::default(), now()).unwrap_err();
        assert!(matches!(err, ExportError::Schema(_)));
        assert!(err.errors()[0].starts_with("Export failed: "));
    }
}
