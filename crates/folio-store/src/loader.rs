//! Source file discovery and decoding.
//!
//! A collection is backed by JSON array files and frontmatter documents. The
//! loaders here turn each file into raw field maps; schema decoding happens in
//! the repository.

use std::path::{Path, PathBuf};

use folio_core::{CoreError, frontmatter, slug};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Keys under which a JSON file may hold its item array.
const ARRAY_KEYS: [&str; 3] = ["objects", "entries", "items"];

/// Format of a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// JSON array (or object wrapping one).
    Json,
    /// Frontmatter document (`.md`, `.markdown`, `.txt`).
    Frontmatter,
}

impl SourceFormat {
    /// Determine the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "md" | "markdown" | "txt" => Some(Self::Frontmatter),
            _ => None,
        }
    }
}

/// Raw fields for one item, before schema decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    pub fields: serde_json::Value,
    /// Slug to use when the fields do not declare one.
    pub fallback_slug: Option<String>,
    pub source: PathBuf,
}

/// List the source files directly inside a collection directory, sorted by
/// file name. Hidden files and unknown extensions are skipped.
pub fn collection_files(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let path = entry.into_path();
        if SourceFormat::from_path(&path).is_some() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "ignoring non-content file");
        }
    }

    Ok(files)
}

/// Read every item from a JSON source file.
///
/// Accepts a top-level array or an object holding one under `objects`,
/// `entries` or `items`.
pub fn read_json_items(path: &Path) -> Result<Vec<RawItem>, CoreError> {
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut object) => ARRAY_KEYS
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(serde_json::Value::Array(items)) => Some(items),
                _ => None,
            })
            .ok_or_else(|| {
                CoreError::schema(path, "expected an array under `objects`, `entries` or `items`")
            })?,
        _ => {
            return Err(CoreError::schema(
                path,
                "expected a JSON array or an object wrapping one",
            ));
        }
    };

    Ok(items
        .into_iter()
        .map(|fields| RawItem {
            fields,
            fallback_slug: None,
            source: path.to_path_buf(),
        })
        .collect())
}

/// Read a frontmatter document as a single item.
///
/// A non-empty body becomes the `content` field unless the metadata already
/// sets one.
pub fn read_frontmatter_item(path: &Path) -> Result<RawItem, CoreError> {
    let content = std::fs::read_to_string(path)?;
    let document = frontmatter::parse_document(&content, path)?;

    let mut fields = document.metadata.into_json();
    if !document.body.is_empty() && !fields.contains_key("content") {
        fields.insert(
            "content".to_string(),
            serde_json::Value::String(document.body),
        );
    }

    Ok(RawItem {
        fields: serde_json::Value::Object(fields),
        fallback_slug: slug::from_file_name(path),
        source: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_source_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("a.json")),
            Some(SourceFormat::Json)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a.MD")),
            Some(SourceFormat::Frontmatter)
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a.txt")),
            Some(SourceFormat::Frontmatter)
        );
        assert_eq!(SourceFormat::from_path(Path::new("a.png")), None);
        assert_eq!(SourceFormat::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_collection_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().expect("create temp dir");
        for name in ["b.md", "a.txt", "c.json", ".hidden.md", "photo.jpg"] {
            std::fs::write(dir.path().join(name), "").expect("write");
        }
        std::fs::create_dir(dir.path().join("nested")).expect("mkdir");
        std::fs::write(dir.path().join("nested/d.md"), "").expect("write");

        let files = collection_files(dir.path()).expect("list");
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.md", "c.json"]);
    }

    #[test]
    fn test_collection_files_missing_dir() {
        assert!(collection_files(Path::new("/nonexistent/folio/dir")).is_err());
    }

    #[test]
    fn test_read_json_wrapped_and_bare() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let wrapped = dir.path().join("journal.json");
        std::fs::write(&wrapped, r#"{ "entries": [{ "slug": "a" }, { "slug": "b" }] }"#)
            .expect("write");
        let items = read_json_items(&wrapped).expect("read");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].fields, json!({ "slug": "b" }));
        assert_eq!(items[0].fallback_slug, None);

        let bare = dir.path().join("bare.json");
        std::fs::write(&bare, r#"[{ "slug": "x" }]"#).expect("write");
        assert_eq!(read_json_items(&bare).expect("read").len(), 1);
    }

    #[test]
    fn test_read_json_wrong_shape() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("odd.json");
        std::fs::write(&path, r#"{ "things": [] }"#).expect("write");
        assert!(matches!(
            read_json_items(&path),
            Err(CoreError::Schema { .. })
        ));

        std::fs::write(&path, "{ not json").expect("write");
        assert!(matches!(read_json_items(&path), Err(CoreError::Json(_))));
    }

    #[test]
    fn test_read_frontmatter_item() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("morning-light.md");
        std::fs::write(
            &path,
            "---\ntitle: Morning Light\n---\n\nA study of natural light.\n",
        )
        .expect("write");

        let item = read_frontmatter_item(&path).expect("read");
        assert_eq!(item.fallback_slug.as_deref(), Some("morning-light"));
        assert_eq!(item.fields["title"], json!("Morning Light"));
        assert_eq!(item.fields["content"], json!("A study of natural light."));
    }

    #[test]
    fn test_read_frontmatter_item_malformed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("broken.md");
        std::fs::write(&path, "no delimiters here").expect("write");
        assert!(matches!(
            read_frontmatter_item(&path),
            Err(CoreError::MalformedContent { .. })
        ));
    }
}
