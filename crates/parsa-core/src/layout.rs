//! # Layout Conventions
//!
//! Relative paths shared by the persisted site tree and the export archive.
//! The exporter writes entries under these names and the sync tool reads
//! them back.
//!
//! Content and media have the same relative path in the site tree and in
//! the archive, so replaying an archive writes each entry at its own path
//! under the target root.

/// Canonical content document (structured JSON).
pub const CONTENT_JSON: &str = "data/content.json";

/// Generated-source rendition of the content document.
pub const CONTENT_SOURCE: &str = "data/content.rs";

/// Schema definition copy.
pub const CONTENT_SCHEMA: &str = "data/content-schema.json";

/// Uploaded media directory (site tree) and media folder (archive).
pub const MEDIA_DIR: &str = "public/images";

/// Public URL prefix under which [`MEDIA_DIR`] is served.
pub const MEDIA_URL_PREFIX: &str = "/images";

/// Human-readable import instructions at the archive root.
pub const IMPORT_INSTRUCTIONS: &str = "IMPORT_INSTRUCTIONS.md";

/// Standalone replay script at the archive root.
pub const SYNC_SCRIPT: &str = "sync-content.sh";

/// Extensions treated as images when packaging media.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

/// Archive entry name for a media file.
pub fn media_entry(file_name: &str) -> String {
    format!("{MEDIA_DIR}/{file_name}")
}

/// Final path segment of a media reference, without any query string or
/// fragment, with `.jpg` appended when the segment has no extension.
/// `/images/hero?v=2` becomes `hero.jpg`.
///
/// Returns `None` when the segment is empty, `.`, `..`, or contains a
/// backslash, since no such name can be written inside the media directory.
pub fn media_file_name(reference: &str) -> Option<String> {
    let path = reference.split(['?', '#']).next().unwrap_or_default();
    let segment = path.rsplit('/').next().unwrap_or_default();
    if matches!(segment, "" | "." | "..") || segment.contains('\\') {
        return None;
    }
    if segment.contains('.') {
        Some(segment.to_string())
    } else {
        Some(format!("{segment}.jpg"))
    }
}

/// Whether a file name carries one of the [`IMAGE_EXTENSIONS`].
pub fn is_image(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_file_name_keeps_extension() {
        assert_eq!(media_file_name("/images/hero-1.jpg").as_deref(), Some("hero-1.jpg"));
        assert_eq!(
            media_file_name("https://cdn.example.com/a/b/c.webp").as_deref(),
            Some("c.webp")
        );
    }

    #[test]
    fn media_file_name_defaults_to_jpg() {
        assert_eq!(media_file_name("/images/hero").as_deref(), Some("hero.jpg"));
        assert_eq!(media_file_name("plain").as_deref(), Some("plain.jpg"));
    }

    #[test]
    fn media_file_name_drops_query_and_fragment() {
        assert_eq!(media_file_name("/images/a.jpg?v=2").as_deref(), Some("a.jpg"));
        assert_eq!(media_file_name("/images/a.png#top").as_deref(), Some("a.png"));
        assert_eq!(
            media_file_name("https://cdn.example.com/img?src=/x/y.gif").as_deref(),
            Some("img.jpg")
        );
    }

    #[test]
    fn media_file_name_rejects_unwritable_segments() {
        assert_eq!(media_file_name("/images/.."), None);
        assert_eq!(media_file_name("/images/."), None);
        assert_eq!(media_file_name("/images/"), None);
        assert_eq!(media_file_name("?v=1"), None);
        assert_eq!(media_file_name("/images/..\\secret.jpg"), None);
    }

    #[test]
    fn media_entry_is_under_media_dir() {
        assert_eq!(media_entry("a.png"), "public/images/a.png");
    }

    #[test]
    fn image_detection_is_case_insensitive() {
        assert!(is_image("photo.JPG"));
        assert!(is_image("photo.webp"));
        assert!(!is_image("clip.mp4"));
        assert!(!is_image("jpg"));
    }
}
