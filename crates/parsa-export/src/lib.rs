//! # parsa-export: Content Archives
//!
//! Moves site content between an admin deployment and a static build.
//!
//! - [`exporter`]: [`ContentExporter`] validates the document and packages
//!   it, the schema, media and import artifacts into a zip archive.
//! - [`sync`]: [`sync_archive`] replays an archive onto a [`SyncTarget`].
//! - [`source`]: the generated-source rendition of the content document.
//! - [`artifacts`]: `IMPORT_INSTRUCTIONS.md` and `sync-content.sh`.
//!
//! Archive entry names come from [`parsa_core::layout`]; the exporter and
//! the sync side never negotiate them.

pub mod artifacts;
pub mod error;
pub mod exporter;
pub mod source;
pub mod sync;

pub use error::{ExportError, SyncError};
pub use exporter::{ContentExporter, ExportArchive, ExportFormat, ExportOptions};
pub use sync::{sync_archive, sync_bytes, SyncFailure, SyncReport, SyncTarget};
