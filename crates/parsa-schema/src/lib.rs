//! # parsa-schema: Content Schema Validation
//!
//! Every write to the site content passes through [`ContentValidator`]
//! before it reaches disk, and every export passes through it before an
//! archive is built.
//!
//! ## Schema
//!
//! The draft-07 schema in `schemas/content.schema.json` is embedded at
//! compile time ([`CONTENT_SCHEMA`]). A deployment may instead load the
//! persisted copy at `data/content-schema.json` via
//! [`ContentValidator::load_or_default`]; the exporter copies whichever text
//! the validator was built from into the archive.
//!
//! ## Outcomes
//!
//! Validation of a JSON object never fails: it yields a
//! [`ValidationReport`], possibly with violations. Only input that is not a
//! JSON object at all (or not JSON) is a [`SchemaError`].
//!
//! ## Crate Policy
//!
//! - Depends only on `parsa-core` internally.
//! - Validation is pure and deterministic: same input, same report.

pub mod validate;

pub use validate::{ContentValidator, SchemaError, ValidationReport, Violation, CONTENT_SCHEMA};
