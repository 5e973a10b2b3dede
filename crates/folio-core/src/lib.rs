//! Folio Core Library
//!
//! Core types, configuration, frontmatter parsing and error handling for the
//! Folio content layer.

pub mod config;
pub mod content;
pub mod date;
pub mod error;
pub mod frontmatter;
pub mod slug;

pub use config::Config;
pub use content::{CollectionKind, ContentBlock, ContentBody, ContentItem, Record};
pub use error::{CoreError, Result};
pub use frontmatter::{Document, FieldValue, Metadata};
