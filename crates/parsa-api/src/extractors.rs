//! # Request Helpers
//!
//! JSON body extraction with uniform error mapping, and the `ETag` /
//! `If-Match` header pair used for content revisions.

use axum::extract::rejection::JsonRejection;
use axum::http::header::{ETAG, IF_MATCH};
use axum::http::{HeaderMap, HeaderValue};
use axum::Json;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Revision from an `If-Match` header. Quotes and a weak `W/` prefix are
/// stripped; `*` and a missing header both mean "no precondition".
pub fn if_match(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    let Some(value) = headers.get(IF_MATCH) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| AppError::BadRequest("If-Match header is not valid ASCII".to_string()))?
        .trim();
    if raw == "*" {
        return Ok(None);
    }
    let tag = raw.strip_prefix("W/").unwrap_or(raw).trim_matches('"');
    if tag.is_empty() {
        return Err(AppError::BadRequest("If-Match header is empty".to_string()));
    }
    Ok(Some(tag.to_string()))
}

/// `ETag` header for a revision.
pub fn etag(revision: &str) -> (axum::http::HeaderName, HeaderValue) {
    let value = HeaderValue::from_str(&format!("\"{revision}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("\"\""));
    (ETAG, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(IF_MATCH, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn if_match_strips_quotes_and_weak_prefix() {
        assert_eq!(if_match(&headers("\"abc\"")).unwrap().as_deref(), Some("abc"));
        assert_eq!(if_match(&headers("W/\"abc\"")).unwrap().as_deref(), Some("abc"));
        assert_eq!(if_match(&headers("abc")).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn if_match_absent_or_wildcard_is_none() {
        assert_eq!(if_match(&HeaderMap::new()).unwrap(), None);
        assert_eq!(if_match(&headers("*")).unwrap(), None);
    }

    #[test]
    fn if_match_empty_is_bad_request() {
        assert!(matches!(
            if_match(&headers("\"\"")),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn etag_is_quoted() {
        let (name, value) = etag("abc123");
        assert_eq!(name, ETAG);
        assert_eq!(value, "\"abc123\"");
    }
}
