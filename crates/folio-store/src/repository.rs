//! Content repository.
//!
//! Loads every configured collection once into an immutable snapshot and
//! answers list and slug lookups against it. Individual bad files are skipped
//! and recorded; a collection whose sources cannot be read is marked
//! unavailable rather than failing the whole load.

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    path::{Path, PathBuf},
};

use folio_core::{CollectionKind, Config, ContentItem, CoreError};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::loader::{self, RawItem, SourceFormat};

/// Repository lookup errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No collection with this name is configured.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// The collection's sources could not be read.
    #[error("collection `{collection}` is unavailable: {reason}")]
    Unavailable { collection: String, reason: String },
}

/// Result type for repository lookups.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A file or item skipped while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadIssue {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for LoadIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Whether a collection's sources were readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionState {
    /// Loaded. May hold zero items.
    Ready,
    /// Sources missing or unreadable.
    Unavailable(String),
}

/// A loaded collection.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    kind: CollectionKind,
    state: CollectionState,
    items: Vec<ContentItem>,
    issues: Vec<LoadIssue>,
}

impl Collection {
    /// Load a collection from `<root>/<name>.json` and `<root>/<name>/`.
    pub fn load(root: &Path, name: &str, kind: CollectionKind) -> Self {
        let mut collection = Self {
            name: name.to_string(),
            kind,
            state: CollectionState::Ready,
            items: Vec::new(),
            issues: Vec::new(),
        };

        let json_path = root.join(format!("{name}.json"));
        let dir = root.join(name);
        let has_file = json_path.is_file();
        let has_dir = dir.is_dir();

        if !has_file && !has_dir {
            let reason = format!(
                "neither {} nor {} exists",
                dir.display(),
                json_path.display()
            );
            warn!(collection = name, %reason, "collection unavailable");
            collection.state = CollectionState::Unavailable(reason);
            return collection;
        }

        // A collection is unavailable only when every source it has failed.
        let sources = usize::from(has_file) + usize::from(has_dir);
        let mut failures = Vec::new();

        if has_file && let Err(reason) = collection.load_json(&json_path) {
            failures.push(reason);
        }

        if has_dir {
            match loader::collection_files(&dir) {
                Ok(files) => {
                    for path in files {
                        collection.load_file(&path);
                    }
                }
                Err(e) => {
                    let reason = format!("{}: {e}", dir.display());
                    collection.record_issue(&dir, e.to_string());
                    failures.push(reason);
                }
            }
        }

        if failures.len() == sources {
            let reason = failures.join("; ");
            warn!(collection = name, %reason, "no readable source, collection unavailable");
            collection.state = CollectionState::Unavailable(reason);
        }

        info!(
            collection = name,
            kind = %kind,
            items = collection.items.len(),
            issues = collection.issues.len(),
            "collection loaded"
        );

        collection
    }

    fn load_file(&mut self, path: &Path) {
        match SourceFormat::from_path(path) {
            Some(SourceFormat::Json) => {
                // Failure is already recorded as an issue.
                let _ = self.load_json(path);
            }
            Some(SourceFormat::Frontmatter) => match loader::read_frontmatter_item(path) {
                Ok(raw) => self.push_raw(raw, None),
                Err(e) => self.record_error(path, &e),
            },
            None => debug!(path = %path.display(), "ignoring non-content file"),
        }
    }

    /// Load every item of a JSON source. On failure the issue is recorded
    /// and its description returned.
    fn load_json(&mut self, path: &Path) -> std::result::Result<(), String> {
        match loader::read_json_items(path) {
            Ok(raws) => {
                for (index, raw) in raws.into_iter().enumerate() {
                    self.push_raw(raw, Some(index));
                }
                Ok(())
            }
            Err(e) => {
                let reason = format!("{}: {e}", path.display());
                self.record_error(path, &e);
                Err(reason)
            }
        }
    }

    fn push_raw(&mut self, raw: RawItem, index: Option<usize>) {
        let item = match ContentItem::decode(
            self.kind,
            raw.fields,
            raw.fallback_slug.as_deref(),
            &raw.source,
        ) {
            Ok(item) => item,
            Err(e) => {
                let message = match index {
                    Some(i) => format!("item {i}: {e}"),
                    None => e.to_string(),
                };
                self.record_issue(&raw.source, message);
                return;
            }
        };

        if self.items.iter().any(|existing| existing.slug == item.slug) {
            self.record_issue(
                &raw.source,
                format!("duplicate slug `{}`, keeping the first", item.slug),
            );
            return;
        }

        self.items.push(item);
    }

    fn record_error(&mut self, path: &Path, error: &CoreError) {
        self.record_issue(path, error.to_string());
    }

    fn record_issue(&mut self, path: &Path, message: String) {
        warn!(
            collection = %self.name,
            path = %path.display(),
            error = %message,
            "skipping content"
        );
        self.issues.push(LoadIssue {
            path: path.to_path_buf(),
            message,
        });
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    pub fn is_available(&self) -> bool {
        self.state == CollectionState::Ready
    }

    /// Items in source order.
    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    /// Files and items that were skipped.
    pub fn issues(&self) -> &[LoadIssue] {
        &self.issues
    }

    /// Linear scan for the first item with `slug`.
    pub fn get(&self, slug: &str) -> Option<&ContentItem> {
        self.items.iter().find(|item| item.slug == slug)
    }
}

/// Immutable snapshot of all collections.
///
/// Build once at startup and share (e.g. behind an `Arc`) with whatever
/// serves pages. Loading again yields an equal snapshot while the files are
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct ContentRepository {
    root: PathBuf,
    collections: BTreeMap<String, Collection>,
}

impl ContentRepository {
    /// Load every collection named by the configuration.
    pub fn load(config: &Config) -> Self {
        Self::load_from(&config.content.root, config.collections())
    }

    /// Load the given collections from a content root.
    pub fn load_from(
        root: impl AsRef<Path>,
        collections: impl IntoIterator<Item = (String, CollectionKind)>,
    ) -> Self {
        let root = root.as_ref();
        info!(root = %root.display(), "loading content");

        let mut seen = HashSet::new();
        let collections = collections
            .into_iter()
            .filter(|(name, _)| seen.insert(name.clone()))
            .map(|(name, kind)| {
                let collection = Collection::load(root, &name, kind);
                (name, collection)
            })
            .collect();

        Self {
            root: root.to_path_buf(),
            collections,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All collections, ordered by name.
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }

    pub fn collection(&self, name: &str) -> Result<&Collection> {
        self.collections
            .get(name)
            .ok_or_else(|| StoreError::UnknownCollection(name.to_string()))
    }

    pub fn state(&self, name: &str) -> Result<&CollectionState> {
        self.collection(name).map(Collection::state)
    }

    /// Every item of a collection, in source order.
    ///
    /// An empty collection is `Ok(&[])`; an unreadable one is
    /// [`StoreError::Unavailable`].
    pub fn list_all(&self, name: &str) -> Result<&[ContentItem]> {
        let collection = self.collection(name)?;
        match &collection.state {
            CollectionState::Ready => Ok(collection.items()),
            CollectionState::Unavailable(reason) => Err(StoreError::Unavailable {
                collection: name.to_string(),
                reason: reason.clone(),
            }),
        }
    }

    /// Look up an item by slug. A missing slug is `Ok(None)`.
    pub fn get_by_slug(&self, name: &str, slug: &str) -> Result<Option<&ContentItem>> {
        let items = self.list_all(name)?;
        Ok(items.iter().find(|item| item.slug == slug))
    }

    /// Like [`list_all`](Self::list_all), but degrades to an empty slice.
    pub fn items(&self, name: &str) -> &[ContentItem] {
        self.list_all(name).unwrap_or_else(|e| {
            warn!(error = %e, "treating collection as empty");
            &[]
        })
    }

    /// Like [`get_by_slug`](Self::get_by_slug), but degrades to `None`.
    pub fn find(&self, name: &str, slug: &str) -> Option<&ContentItem> {
        self.items(name).iter().find(|item| item.slug == slug)
    }

    /// Issues recorded while loading a collection.
    pub fn issues(&self, name: &str) -> &[LoadIssue] {
        self.collections
            .get(name)
            .map(Collection::issues)
            .unwrap_or_default()
    }
}
