//! List command - enumerate a collection

use color_eyre::eyre::{Result, WrapErr};
use folio_core::{Config, ContentItem};
use folio_store::{ContentRepository, paginate, sort_by_date, with_label};
use serde::Deserialize;

/// Sort order for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first, undated last.
    Date,
    /// Alphabetical by title.
    Title,
}

/// Listing options, shared by the CLI and the JSON API query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub sort: Option<SortKey>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
}

/// One page of a filtered, sorted listing.
#[derive(Debug)]
pub struct Selection<'a> {
    pub items: Vec<&'a ContentItem>,
    pub page: usize,
    pub total_pages: usize,
    /// Matching items across all pages.
    pub total: usize,
}

/// Apply label filter, sort and pagination to a collection's items.
///
/// Without a sort key the source order is kept.
pub fn select<'a>(items: &'a [ContentItem], query: &ListQuery) -> Selection<'a> {
    let mut selected: Vec<&ContentItem> = match &query.label {
        Some(label) => with_label(items, label),
        None => items.iter().collect(),
    };

    match query.sort {
        Some(SortKey::Date) => selected = sort_by_date(selected),
        Some(SortKey::Title) => selected.sort_by(|a, b| a.title().cmp(b.title())),
        None => {}
    }

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(0);
    let total = selected.len();
    let (page_items, total_pages) = paginate(&selected, page, per_page);

    Selection {
        items: page_items.to_vec(),
        page,
        total_pages,
        total,
    }
}

/// Run the list command.
pub fn run(config: &Config, collection: &str, query: &ListQuery, json: bool) -> Result<()> {
    tracing::info!(collection, ?query, "Listing collection");

    let repo = ContentRepository::load(config);
    let items = repo
        .list_all(collection)
        .wrap_err("Failed to list collection")?;
    let selection = select(items, query);

    if json {
        println!("{}", serde_json::to_string_pretty(&selection.items)?);
        return Ok(());
    }

    for item in &selection.items {
        let date = item.record.date().unwrap_or("");
        println!("{:<36} {:<24} {}", item.slug, date, item.title());
    }

    println!();
    println!(
        "{} of {} item(s), page {}/{}",
        selection.items.len(),
        selection.total,
        selection.page,
        selection.total_pages.max(1)
    );

    let issues = repo.issues(collection);
    if !issues.is_empty() {
        println!("  ⚠ {} file(s) skipped; run `folio check` for details", issues.len());
    }

    Ok(())
}
