//! Slug derivation and validation.

use std::path::Path;

/// Derive a slug from a file name by stripping its extension.
///
/// `journal/hello-world.md` → `hello-world`.
pub fn from_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Build a URL-friendly slug from a title.
///
/// Lowercases the input and joins runs of ASCII alphanumerics with `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Whether `slug` is lowercase alphanumerics joined by single dashes.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_name() {
        assert_eq!(
            from_file_name(Path::new("journal/hello-world.md")).as_deref(),
            Some("hello-world")
        );
        assert_eq!(
            from_file_name(Path::new("notes.v2.txt")).as_deref(),
            Some("notes.v2")
        );
    }

    #[test]
    fn test_slugify() {
        assert_eq!(
            slugify("The Gentle Future of Digital Interfaces"),
            "the-gentle-future-of-digital-interfaces"
        );
        assert_eq!(
            slugify("Design Futures Pavilion: RAW Collaborative 24"),
            "design-futures-pavilion-raw-collaborative-24"
        );
        assert_eq!(slugify("  AR/VR -- Fundamentals!  "), "ar-vr-fundamentals");
        assert_eq!(slugify("¡¿?!"), "");
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("ceramic-vessel-3"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Ceramic"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("double--dash"));
        assert!(!is_valid_slug("with space"));
    }
}
