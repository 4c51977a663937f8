//! Integration tests: schema loading from disk and file validation, as the
//! `parsa validate` command and the store use them.

use parsa_core::testing::sample_document;
use parsa_schema::{ContentValidator, SchemaError, CONTENT_SCHEMA};
use tempfile::tempdir;

#[test]
fn load_or_default_falls_back_to_embedded_schema() {
    let dir = tempdir().unwrap();
    let validator =
        ContentValidator::load_or_default(&dir.path().join("content-schema.json")).unwrap();
    assert_eq!(validator.schema_source(), CONTENT_SCHEMA);
}

#[test]
fn load_or_default_prefers_persisted_schema() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("content-schema.json");
    let permissive = r#"{"$schema": "http://json-schema.org/draft-07/schema#", "type": "object"}"#;
    std::fs::write(&path, permissive).unwrap();

    let validator = ContentValidator::load_or_default(&path).unwrap();
    assert_eq!(validator.schema_source(), permissive);
    assert!(validator
        .validate(&serde_json::json!({}))
        .unwrap()
        .is_valid());
}

#[test]
fn validate_file_reports_violations() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("content.json");
    let mut value = serde_json::to_value(sample_document()).unwrap();
    value["projects"][0]["category"] = serde_json::json!("invalid-category");
    std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();

    let report = ContentValidator::new().unwrap().validate_file(&path).unwrap();
    assert!(!report.is_valid());
    assert!(report.to_string().contains("/projects/0/category"));
}

#[test]
fn validate_file_accepts_sample() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("content.json");
    std::fs::write(&path, serde_json::to_vec(&sample_document()).unwrap()).unwrap();

    let report = ContentValidator::new().unwrap().validate_file(&path).unwrap();
    assert!(report.is_valid());
}

#[test]
fn validate_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = ContentValidator::new()
        .unwrap()
        .validate_file(&dir.path().join("absent.json"))
        .unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
}
