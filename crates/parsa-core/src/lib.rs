//! # parsa-core: Foundational Types for the Parsa Decor Site
//!
//! Every other crate in the workspace depends on `parsa-core`; it depends on
//! nothing internal.
//!
//! ## Contents
//!
//! - [`content`]: the [`ContentDocument`] aggregate and its sections, plus
//!   the closed enumerations ([`ProjectCategory`], [`ServiceIcon`]).
//! - [`patch`]: [`ContentPatch`], the typed partial update with one optional
//!   field per top-level section.
//! - [`config`]: [`SiteConfig`], loaded from YAML with `PARSA_*` overrides.
//! - [`layout`]: fixed relative paths shared by the persisted site tree and
//!   export archives.
//! - [`fs`]: atomic file replacement used by every writer.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.
//! - Wire format is camelCase JSON; field names match the persisted file.

pub mod config;
pub mod content;
pub mod fs;
pub mod layout;
pub mod patch;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::{ConfigError, SiteConfig};
pub use content::{
    About, ColorPalette, ContentDocument, GalleryItem, Hero, Office, Project, ProjectCategory,
    ProjectSpecs, Service, ServiceIcon, UnknownVariant,
};
pub use patch::ContentPatch;
