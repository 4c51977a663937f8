//! # parsa-store: Content and Media Persistence
//!
//! - [`ContentStore`] owns the single content file. Every write is
//!   validated, serialized through an in-process lock, and replaces the file
//!   atomically. Each persisted state has a revision (SHA-256 of the file
//!   bytes) that callers may use as an optimistic-concurrency precondition.
//! - [`MediaStore`] accepts uploaded images into the public media
//!   directory and resolves media references back to files for export.
//!
//! ## Crate Policy
//!
//! - No `.unwrap()` outside tests.
//! - Concurrent writers in separate processes are not coordinated; the last
//!   rename wins. Use the revision precondition to detect that.

pub mod error;
pub mod media;
pub mod store;

pub use error::{MediaError, StoreError};
pub use media::{MediaStore, StoredMedia, ALLOWED_MEDIA_TYPES};
pub use store::{revision_of, ContentStore};
