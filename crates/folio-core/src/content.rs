//! Content types and structures.
//!
//! Every collection holds one kind of record. Raw fields (from frontmatter or
//! JSON) are decoded into the record type for that kind when loaded.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    date::parse_date,
    error::{CoreError, Result},
};

/// Kind of content held by a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectionKind {
    DesignedObject,
    Journal,
    Experiment,
    Workshop,
    Exhibition,
    CaseStudy,
}

impl CollectionKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 6] = [
        Self::DesignedObject,
        Self::Journal,
        Self::Experiment,
        Self::Workshop,
        Self::Exhibition,
        Self::CaseStudy,
    ];

    /// Kebab-case name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DesignedObject => "designed-object",
            Self::Journal => "journal",
            Self::Experiment => "experiment",
            Self::Workshop => "workshop",
            Self::Exhibition => "exhibition",
            Self::CaseStudy => "case-study",
        }
    }

    /// Collection directory name used when no collections are configured.
    pub fn default_collection(&self) -> &'static str {
        match self {
            Self::DesignedObject => "designed-objects",
            Self::Journal => "journal",
            Self::Experiment => "experiments",
            Self::Workshop => "workshops",
            Self::Exhibition => "exhibitions",
            Self::CaseStudy => "case-studies",
        }
    }

    /// Decode a raw field map into the record type for this kind.
    pub fn decode(&self, fields: serde_json::Value, path: &Path) -> Result<Record> {
        Ok(match self {
            Self::DesignedObject => Record::DesignedObject(decode_as(fields, path)?),
            Self::Journal => Record::Journal(decode_as(fields, path)?),
            Self::Experiment => Record::Experiment(decode_as(fields, path)?),
            Self::Workshop => Record::Workshop(decode_as(fields, path)?),
            Self::Exhibition => Record::Exhibition(decode_as(fields, path)?),
            Self::CaseStudy => Record::CaseStudy(decode_as(fields, path)?),
        })
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown content kind: {s}"))
    }
}

fn decode_as<T: DeserializeOwned>(fields: serde_json::Value, path: &Path) -> Result<T> {
    serde_json::from_value(fields).map_err(|e| CoreError::schema(path, e.to_string()))
}

/// A structured body block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Paragraph { text: String },
    Subheading { text: String },
    List { items: Vec<String> },
}

/// Body of a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentBody {
    /// Raw text, rendered as Markdown.
    Text(String),
    /// Typed blocks.
    Blocks(Vec<ContentBlock>),
}

impl ContentBody {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Blocks(blocks) => blocks.is_empty(),
        }
    }

    /// Render the body to HTML.
    pub fn to_html(&self) -> String {
        match self {
            Self::Text(text) => {
                let parser = pulldown_cmark::Parser::new(text);
                let mut html = String::new();
                pulldown_cmark::html::push_html(&mut html, parser);
                html
            }
            Self::Blocks(blocks) => {
                let mut html = String::new();
                for block in blocks {
                    match block {
                        ContentBlock::Paragraph { text } => {
                            html.push_str(&format!("<p>{}</p>\n", escape_html(text)));
                        }
                        ContentBlock::Subheading { text } => {
                            html.push_str(&format!("<h2>{}</h2>\n", escape_html(text)));
                        }
                        ContentBlock::List { items } => {
                            html.push_str("<ul>\n");
                            for item in items {
                                html.push_str(&format!("<li>{}</li>\n", escape_html(item)));
                            }
                            html.push_str("</ul>\n");
                        }
                    }
                }
                html
            }
        }
    }

    /// Plain text of the body, blocks joined by blank lines.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => blocks
                .iter()
                .map(|block| match block {
                    ContentBlock::Paragraph { text } | ContentBlock::Subheading { text } => {
                        text.clone()
                    }
                    ContentBlock::List { items } => items.join("\n"),
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A product or object from the studio's own range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignedObject {
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub price: Option<String>,
    /// Slugs of related objects in the same collection.
    #[serde(default, alias = "relatedProducts")]
    pub related: Vec<String>,    #[serde(default)]
    pub content: Option<ContentBody>,
}

/// A journal article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub content: Option<ContentBody>,
}

/// A studio experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub content: Option<ContentBody>,
}

/// A workshop offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub audience: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub participants: Option<String>,    #[serde(default)]
    pub content: Option<ContentBody>,
}

/// Where an exhibition sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhibitionStatus {
    Past,
    Current,
    Upcoming,
}

impl ExhibitionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Current => "current",
            Self::Upcoming => "upcoming",
        }
    }
}

/// An exhibition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exhibition {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: Option<ExhibitionStatus>,    #[serde(default)]
    pub content: Option<ContentBody>,
}

/// A client case study.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub title: String,
    #[serde(default)]
    pub client: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub content: Option<ContentBody>,
}

/// A decoded record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Record {
    DesignedObject(DesignedObject),
    Journal(JournalEntry),
    Experiment(Experiment),
    Workshop(Workshop),
    Exhibition(Exhibition),
    CaseStudy(CaseStudy),
}

impl Record {
    pub fn kind(&self) -> CollectionKind {
        match self {
            Self::DesignedObject(_) => CollectionKind::DesignedObject,
            Self::Journal(_) => CollectionKind::Journal,
            Self::Experiment(_) => CollectionKind::Experiment,
            Self::Workshop(_) => CollectionKind::Workshop,
            Self::Exhibition(_) => CollectionKind::Exhibition,
            Self::CaseStudy(_) => CollectionKind::CaseStudy,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::DesignedObject(r) => &r.title,
            Self::Journal(r) => &r.title,
            Self::Experiment(r) => &r.title,
            Self::Workshop(r) => &r.title,
            Self::Exhibition(r) => &r.title,
            Self::CaseStudy(r) => &r.title,
        }
    }

    /// Display date, if the kind carries one.
    pub fn date(&self) -> Option<&str> {
        match self {
            Self::Journal(r) => r.date.as_deref(),
            Self::Exhibition(r) => r.date.as_deref(),
            Self::CaseStudy(r) => r.date.as_deref(),
            Self::DesignedObject(_) | Self::Experiment(_) | Self::Workshop(_) => None,
        }
    }

    /// Short summary for listings: the excerpt, falling back to the description.
    pub fn summary(&self) -> Option<&str> {
        match self {
            Self::DesignedObject(r) => r.description.as_deref(),
            Self::Journal(r) => r.excerpt.as_deref(),
            Self::Experiment(r) => r.description.as_deref(),
            Self::Workshop(r) => r.description.as_deref(),
            Self::Exhibition(r) => r.description.as_deref(),
            Self::CaseStudy(r) => r.excerpt.as_deref(),
        }
    }

    pub fn image(&self) -> Option<&str> {
        match self {
            Self::DesignedObject(r) => r.image.as_deref(),
            Self::Journal(r) => r.image.as_deref(),
            Self::Experiment(r) => r.image.as_deref(),
            Self::Workshop(r) => r.image.as_deref(),
            Self::Exhibition(r) => r.image.as_deref(),
            Self::CaseStudy(r) => r.image.as_deref(),
        }
    }

    /// Long-form body, if any.
    pub fn body(&self) -> Option<&ContentBody> {
        match self {
            Self::DesignedObject(r) => r.content.as_ref(),
            Self::Journal(r) => r.content.as_ref(),
            Self::Experiment(r) => r.content.as_ref(),
            Self::Workshop(r) => r.content.as_ref(),
            Self::Exhibition(r) => r.content.as_ref(),
            Self::CaseStudy(r) => r.content.as_ref(),
        }
    }

    /// Every label the item can be filtered by: category, tags, workshop
    /// audiences and categories, exhibition status.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        match self {
            Self::DesignedObject(r) => labels.extend(r.category.as_deref()),
            Self::Journal(r) => {
                labels.extend(r.category.as_deref());
                labels.extend(r.tags.iter().map(String::as_str));
            }
            Self::Experiment(_) => {}
            Self::Workshop(r) => {
                labels.extend(r.audience.iter().map(String::as_str));
                labels.extend(r.categories.iter().map(String::as_str));
            }
            Self::Exhibition(r) => labels.extend(r.status.map(|s| s.as_str())),
            Self::CaseStudy(r) => {
                labels.extend(r.category.as_deref());
                labels.extend(r.tags.iter().map(String::as_str));
            }
        }
        labels
    }
}

/// A loaded content item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentItem {
    /// Resolved slug, unique within its collection.
    pub slug: String,

    /// File the item was loaded from.
    #[serde(skip)]
    pub source: PathBuf,

    #[serde(flatten)]
    pub record: Record,
}

impl ContentItem {
    /// Decode a raw field map into an item of the given kind.
    ///
    /// The `slug` field wins; otherwise `fallback_slug` is used (the file
    /// name without its extension). With neither, the item is rejected.
    pub fn decode(
        kind: CollectionKind,
        mut fields: serde_json::Value,
        fallback_slug: Option<&str>,
        source: &Path,
    ) -> Result<Self> {
        let object = fields
            .as_object_mut()
            .ok_or_else(|| CoreError::schema(source, "content item must be an object"))?;

        let declared = match object.remove("slug") {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(serde_json::Value::String(_)) | Some(serde_json::Value::Null) | None => None,
            Some(other) => {
                return Err(CoreError::schema(
                    source,
                    format!("slug must be a string, found {other}"),
                ));
            }
        };

        let slug = declared
            .or_else(|| fallback_slug.map(str::to_string))
            .ok_or_else(|| CoreError::schema(source, "item has no slug"))?;

        let record = kind.decode(fields, source).map_err(|e| match e {
            CoreError::Schema { path, message } => CoreError::Schema {
                path,
                message: format!("item `{slug}`: {message}"),
            },
            other => other,
        })?;

        Ok(Self {
            slug,
            source: source.to_path_buf(),
            record,
        })
    }

    pub fn title(&self) -> &str {
        self.record.title()
    }

    /// Parsed date used for chronological ordering.
    pub fn sort_date(&self) -> Option<NaiveDate> {
        self.record.date().and_then(parse_date)
    }
}
