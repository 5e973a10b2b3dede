//! Folio Store Library
//!
//! File-backed content repository.
//!
//! # Modules
//!
//! - [`loader`] - Source file discovery and JSON/frontmatter decoding
//! - [`repository`] - Immutable collection snapshot with slug lookup
//! - [`query`] - Date ordering, label filtering and pagination

pub mod loader;
pub mod query;
pub mod repository;

pub use loader::{RawItem, SourceFormat};
pub use query::{paginate, related, sort_by_date, with_label};
pub use repository::{Collection, CollectionState, ContentRepository, LoadIssue, StoreError};
