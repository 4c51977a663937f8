//! # Generated Source Rendition
//!
//! The `source` export format ships the content as a Rust module instead of
//! a JSON file, so a static build can compile the content in. The module
//! embeds the exact pretty-printed JSON in a raw string literal and exposes
//! a typed accessor:
//!
//! ```text
//! // Generated content module. Do not edit by hand.
//! // Last updated: 2026-01-01T00:00:00Z
//!
//! use parsa_core::ContentDocument;
//!
//! pub const CONTENT_JSON: &str = r#"{ ... }"#;
//!
//! pub fn content() -> serde_json::Result<ContentDocument> {
//!     serde_json::from_str(CONTENT_JSON)
//! }
//! ```
//!
//! [`extract_json`] recovers the embedded JSON, which is how sync handles
//! archives exported in this format.

use chrono::{DateTime, SecondsFormat, Utc};

const JSON_CONST: &str = "pub const CONTENT_JSON: &str = ";

/// Render the content module for `json`, stamped with `generated_at`.
pub fn render(json: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "// Generated content module. Do not edit by hand.\n\
         // Last updated: {stamp}\n\
         \n\
         use parsa_core::ContentDocument;\n\
         \n\
         {JSON_CONST}{literal};\n\
         \n\
         pub fn content() -> serde_json::Result<ContentDocument> {{\n    \
             serde_json::from_str(CONTENT_JSON)\n\
         }}\n",
        stamp = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        literal = raw_string_literal(json),
    )
}

/// A raw string literal for `text` with enough `#`s that no `"#...` run
/// inside the text can close it early.
pub fn raw_string_literal(text: &str) -> String {
    let mut longest = 0;
    let mut run: Option<usize> = None;
    for c in text.chars() {
        run = match (c, run) {
            ('"', _) => Some(0),
            ('#', Some(n)) => Some(n + 1),
            _ => None,
        };
        if let Some(n) = run {
            longest = longest.max(n);
        }
    }
    let hashes = "#".repeat(longest + 1);
    format!("r{hashes}\"{text}\"{hashes}")
}

/// The JSON embedded by [`render`], if `source` is such a module.
pub fn extract_json(source: &str) -> Option<&str> {
    let start = source.find(JSON_CONST)? + JSON_CONST.len();
    let literal = source[start..].strip_prefix('r')?;
    let hashes = literal.chars().take_while(|&c| c == '#').count();
    let body = literal[hashes..].strip_prefix('"')?;
    let terminator = format!("\"{}", "#".repeat(hashes));
    let end = body.find(&terminator)?;
    Some(&body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn raw_literal_uses_one_hash_for_plain_text() {
        assert_eq!(raw_string_literal("{\"a\": 1}"), "r#\"{\"a\": 1}\"#");
    }

    #[test]
    fn raw_literal_outgrows_embedded_hash_runs() {
        let text = "{\"caption\": \"room \"## two\"}";
        let literal = raw_string_literal(text);
        assert!(literal.starts_with("r###\""));
        assert!(literal.ends_with("\"###"));
    }

    #[test]
    fn render_has_header_and_accessor() {
        let module = render("{}", stamp());
        assert!(module.starts_with("// Generated content module. Do not edit by hand.\n"));
        assert!(module.contains("// Last updated: 2026-03-14T09:30:00Z\n"));
        assert!(module.contains("pub const CONTENT_JSON: &str = r#\"{}\"#;"));
        assert!(module.contains("pub fn content() -> serde_json::Result<ContentDocument> {"));
    }

    #[test]
    fn extract_recovers_embedded_json() {
        let json = "{\n  \"caption\": \"a \\\"#quoted#\\\" word\"\n}";
        let module = render(json, stamp());
        assert_eq!(extract_json(&module), Some(json));
    }

    #[test]
    fn extract_rejects_other_text() {
        assert_eq!(extract_json("fn main() {}"), None);
        assert_eq!(extract_json("pub const CONTENT_JSON: &str = \"x\";"), None);
    }
}
