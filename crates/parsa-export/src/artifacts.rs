//! Text artifacts shipped at the root of every archive.

use parsa_core::layout;

/// Markdown import guide. `content_entry` is the content path actually
/// present in the archive; `media_count` is the number of packaged files.
pub fn import_instructions(product_name: &str, content_entry: &str, media_count: usize) -> String {
    let media_line = if media_count == 0 {
        "- (no media files were packaged)".to_string()
    } else {
        format!(
            "- `{dir}/`: {media_count} media file(s)",
            dir = layout::MEDIA_DIR
        )
    };

    format!(
        r#"# Content Import Instructions

## Overview
This package contains content exported from the {product_name} admin panel.

## Files Included
- `{content_entry}`: site content
- `{schema}`: content validation schema
{media_line}
- `{script}`: standalone sync script (POSIX sh, needs `unzip`)

## Manual Import Steps

1. **Back up current content**
   ```bash
   cp {json} {json}.backup
   ```

2. **Copy files**
   - Copy `{content_entry}` into your site's `data/` directory
   - Copy everything under `{media_dir}/` into your site's `{media_dir}/` directory

3. **Validate content**
   ```bash
   parsa validate {json}
   ```

4. **Build and deploy** the site as usual.

## Automated Sync

From the site root, either of:

```bash
parsa sync path/to/archive.zip --validate
sh {script} path/to/archive.zip
```

Sync overwrites `{json}` and writes each media file. It never deletes files
that are absent from the archive.

## Troubleshooting

- **Validation errors**: compare the content against `{schema}`; every field is required.
- **Missing images**: check that image references in the content match files in `{media_dir}/`.

## Security Notes

- Review all content before deploying to production.
- Test in a staging environment first.
"#,
        schema = layout::CONTENT_SCHEMA,
        script = layout::SYNC_SCRIPT,
        json = layout::CONTENT_JSON,
        media_dir = layout::MEDIA_DIR,
    )
}

const SYNC_SCRIPT_TEMPLATE: &str = r#"#!/bin/sh
# Replays a content archive onto a site checkout.
# Usage: sh sync-content.sh <path-to-content.zip> [target-root]
set -eu

if [ $# -lt 1 ]; then
  echo "Usage: sh sync-content.sh <path-to-content.zip> [target-root]" >&2
  exit 1
fi

ARCHIVE=$1
TARGET=${2:-.}

if [ ! -f "$ARCHIVE" ]; then
  echo "File not found: $ARCHIVE" >&2
  exit 1
fi

if ! command -v unzip >/dev/null 2>&1; then
  echo "Sync failed: unzip is required" >&2
  exit 1
fi

echo "Starting content sync..."

mkdir -p "$TARGET/$(dirname "@CONTENT_ENTRY@")"
if ! unzip -p "$ARCHIVE" "@CONTENT_ENTRY@" > "$TARGET/@CONTENT_ENTRY@.tmp"; then
  rm -f "$TARGET/@CONTENT_ENTRY@.tmp"
  echo "Sync failed: could not extract @CONTENT_ENTRY@" >&2
  exit 1
fi
mv "$TARGET/@CONTENT_ENTRY@.tmp" "$TARGET/@CONTENT_ENTRY@"
echo "Updated @CONTENT_ENTRY@"

unzip -Z1 "$ARCHIVE" | while IFS= read -r entry; do
  case "$entry" in
    */) ;;
    *..*) echo "Skipping $entry: unsafe path" >&2 ;;
    @MEDIA_DIR@/?*)
      mkdir -p "$TARGET/$(dirname "$entry")"
      if unzip -p "$ARCHIVE" "$entry" > "$TARGET/$entry"; then
        echo "Updated $entry"
      else
        echo "Failed to write $entry" >&2
      fi
      ;;
  esac
done

echo "Content sync completed successfully!"
"#;

/// Shell script that replays the archive with `unzip`. It extracts
/// `content_entry` and every media entry, mirroring `parsa sync`.
pub fn sync_script(content_entry: &str) -> String {
    SYNC_SCRIPT_TEMPLATE
        .replace("@CONTENT_ENTRY@", content_entry)
        .replace("@MEDIA_DIR@", layout::MEDIA_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_name_actual_content_entry() {
        let text = import_instructions("parsa-decor", "data/content.rs", 3);
        assert!(text.starts_with("# Content Import Instructions"));
        assert!(text.contains("`data/content.rs`: site content"));
        assert!(text.contains("3 media file(s)"));
        assert!(text.contains("parsa sync path/to/archive.zip"));
    }

    #[test]
    fn instructions_without_media() {
        let text = import_instructions("parsa-decor", "data/content.json", 0);
        assert!(text.contains("no media files were packaged"));
    }

    #[test]
    fn script_is_fully_substituted() {
        let script = sync_script("data/content.json");
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(!script.contains('@'));
        assert!(script.contains("unzip -p \"$ARCHIVE\" \"data/content.json\""));
        assert!(script.contains("public/images/?*)"));
    }
}
