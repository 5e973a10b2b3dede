//! New command - create new content from a frontmatter template

use std::{fs, path::PathBuf};

use chrono::Utc;
use color_eyre::eyre::{Result, WrapErr, bail};
use folio_core::{CollectionKind, Config, FieldValue, Metadata, slug::slugify};

/// Run the new command.
///
/// Writes `<root>/<collection>/<slug>.md` with boilerplate frontmatter and
/// returns its path. Never overwrites an existing file.
pub fn run(
    config: &Config,
    collection: &str,
    title: &str,
    date: Option<&str>,
    tags: &[String],
) -> Result<PathBuf> {
    tracing::info!(collection, title, "Creating new content");

    let collections = config.collections();
    let Some(kind) = collections.get(collection).copied() else {
        bail!("unknown collection: {collection}");
    };

    let slug = slugify(title);
    if slug.is_empty() {
        bail!("cannot derive a slug from title {title:?}");
    }

    let file_path = config
        .content
        .root
        .join(collection)
        .join(format!("{slug}.md"));
    if file_path.exists() {
        bail!("{} already exists", file_path.display());
    }

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).wrap_err("Failed to create directories")?;
    }

    fs::write(&file_path, render(kind, title, date, tags)).wrap_err("Failed to write file")?;

    tracing::info!(path = %file_path.display(), "Created new content file");
    println!("Created: {}", file_path.display());

    Ok(file_path)
}

fn render(kind: CollectionKind, title: &str, date: Option<&str>, tags: &[String]) -> String {
    let mut metadata = Metadata::new();
    metadata.insert("title", FieldValue::Text(title.to_string()));

    let dated = matches!(
        kind,
        CollectionKind::Journal | CollectionKind::Exhibition | CollectionKind::CaseStudy
    );
    if dated {
        let date = date
            .map(str::to_string)
            .unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());
        metadata.insert("date", FieldValue::Text(date));
    }

    let tagged = matches!(kind, CollectionKind::Journal | CollectionKind::CaseStudy);
    if tagged && !tags.is_empty() {
        let tags = tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        metadata.insert("tags", FieldValue::List(tags));
    }

    let mut out = metadata.to_frontmatter();
    if matches!(
        kind,
        CollectionKind::Journal | CollectionKind::Experiment | CollectionKind::CaseStudy
    ) {
        out.push_str("\nWrite your content here.\n");
    }
    out
}
