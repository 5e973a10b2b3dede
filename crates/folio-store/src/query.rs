//! Ordering, filtering and paging over loaded items.

use std::cmp::Ordering;

use folio_core::{ContentItem, Record};

use crate::repository::ContentRepository;

/// Items sorted by date, newest first. Undated items follow, by title.
pub fn sort_by_date<'a>(items: impl IntoIterator<Item = &'a ContentItem>) -> Vec<&'a ContentItem> {
    let mut items: Vec<_> = items.into_iter().map(|item| (item.sort_date(), item)).collect();
    items.sort_by(|(a_date, a), (b_date, b)| match (b_date, a_date) {
        (Some(b_date), Some(a_date)) => b_date.cmp(a_date),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.title().cmp(b.title()),
    });
    items.into_iter().map(|(_, item)| item).collect()
}

/// Items carrying `label` (case-insensitive) among their categories, tags,
/// audiences or status.
pub fn with_label<'a>(
    items: impl IntoIterator<Item = &'a ContentItem>,
    label: &str,
) -> Vec<&'a ContentItem> {
    items
        .into_iter()
        .filter(|item| {
            item.record
                .labels()
                .iter()
                .any(|l| l.eq_ignore_ascii_case(label))
        })
        .collect()
}

/// Paginate a slice of items. Pages are 1-based; `per_page == 0` puts
/// everything on one page.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> (&[T], usize) {
    if per_page == 0 {
        return (items, 1);
    }

    let total_pages = items.len().div_ceil(per_page);
    let start = page.saturating_sub(1).saturating_mul(per_page);
    let end = start.saturating_add(per_page).min(items.len());

    if start >= items.len() {
        (&[], total_pages)
    } else {
        (&items[start..end], total_pages)
    }
}

/// Resolve a designed object's related slugs within `collection`, skipping
/// any that do not exist.
pub fn related<'a>(
    repo: &'a ContentRepository,
    collection: &str,
    item: &ContentItem,
) -> Vec<&'a ContentItem> {
    let Record::DesignedObject(object) = &item.record else {
        return Vec::new();
    };

    object
        .related
        .iter()
        .filter(|slug| **slug != item.slug)
        .filter_map(|slug| repo.find(collection, slug))
        .collect()
}
