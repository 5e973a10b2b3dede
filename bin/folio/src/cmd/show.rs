//! Show command - print a single item

use color_eyre::eyre::{Result, WrapErr, bail};
use folio_core::{Config, ContentItem};
use folio_store::{ContentRepository, related};

/// Run the show command.
pub fn run(config: &Config, collection: &str, slug: &str, json: bool, html: bool) -> Result<()> {
    tracing::info!(collection, slug, "Showing item");

    let repo = ContentRepository::load(config);
    let Some(item) = repo
        .get_by_slug(collection, slug)
        .wrap_err("Failed to read collection")?
    else {
        bail!("{collection}/{slug} not found");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else if html {
        println!("{}", item.record.body().map(|b| b.to_html()).unwrap_or_default());
    } else {
        print!("{}", describe(item));
        let related = related(&repo, collection, item);
        if !related.is_empty() {
            println!();
            println!("Related:");
            for other in related {
                println!("  {} ({})", other.title(), other.slug);
            }
        }
    }

    Ok(())
}

/// Plain-text rendering of an item.
fn describe(item: &ContentItem) -> String {
    let record = &item.record;
    let mut out = format!("{}\n", record.title());
    out.push_str(&format!("  slug:   {}\n", item.slug));
    out.push_str(&format!("  kind:   {}\n", record.kind()));
    if let Some(date) = record.date() {
        out.push_str(&format!("  date:   {date}\n"));
    }
    let labels = record.labels();
    if !labels.is_empty() {
        out.push_str(&format!("  labels: {}\n", labels.join(", ")));
    }
    if let Some(image) = record.image() {
        out.push_str(&format!("  image:  {image}\n"));
    }
    if let Some(summary) = record.summary() {
        out.push_str(&format!("\n{summary}\n"));
    }
    if let Some(body) = record.body().filter(|b| !b.is_empty()) {
        out.push_str(&format!("\n{}\n", body.plain_text()));
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use folio_core::CollectionKind;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_describe_journal() {
        let item = ContentItem::decode(
            CollectionKind::Journal,
            json!({
                "slug": "technology-with-empathy",
                "title": "Building Technology with Empathy",
                "date": "March 10, 2024",
                "category": "Technology",
                "excerpt": "We create technology that serves people.",
                "content": [
                    { "type": "subheading", "text": "Designing With, Not For" },
                    { "type": "paragraph", "text": "Empathy begins by listening." }
                ]
            }),
            None,
            Path::new("journal.json"),
        )
        .expect("decode");

        let text = describe(&item);
        assert!(text.starts_with("Building Technology with Empathy\n"));
        assert!(text.contains("slug:   technology-with-empathy"));
        assert!(text.contains("kind:   journal"));
        assert!(text.contains("date:   March 10, 2024"));
        assert!(text.contains("labels: Technology"));
        assert!(text.contains("Designing With, Not For\n\nEmpathy begins by listening."));
    }

    #[test]
    fn test_run_missing_slug_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("journal")).expect("mkdir");

        let mut config = Config::default();
        config.content.root = dir.path().to_path_buf();

        let err = run(&config, "journal", "missing", false, false).unwrap_err();
        assert!(err.to_string().contains("journal/missing not found"));
    }
}
