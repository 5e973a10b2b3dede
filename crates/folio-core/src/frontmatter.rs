//! Frontmatter parsing for content files.
//!
//! A content file looks like:
//!
//! ```text
//! ---
//! title: Hello
//! tags: design, craft
//! ---
//!
//! Body text.
//! ```
//!
//! Metadata lines are `key: value` pairs split on the first colon. Values are
//! either scalars or bracketed arrays; `tags` is always an array.

use std::{collections::BTreeMap, fmt::Write as _, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Frontmatter block delimiter.
pub const DELIMITER: &str = "---";

/// Key that is always decoded as an array.
const TAGS_KEY: &str = "tags";

/// A single decoded metadata value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Scalar string value.
    Text(String),
    /// Array of strings.
    List(Vec<String>),
}

impl FieldValue {
    /// Borrow as a scalar, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }

    /// Borrow as a list, if it is one.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl From<FieldValue> for serde_json::Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => serde_json::Value::String(s),
            FieldValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::String).collect())
            }
        }
    }
}

/// Decoded metadata block. A later duplicate key replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, FieldValue>);

impl Metadata {
    /// Create an empty metadata block.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    /// Scalar value for `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// List value for `key`.
    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(FieldValue::as_list)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(key.into(), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert into a JSON object for schema decoding.
    pub fn into_json(self) -> serde_json::Map<String, serde_json::Value> {
        self.0.into_iter().map(|(k, v)| (k, v.into())).collect()
    }

    /// Serialize back into a delimited frontmatter block.
    ///
    /// Parsing the output yields the same set of key/value pairs. Scalars
    /// that would be read back differently (bracketed, quoted, padded) are
    /// written as JSON strings.
    pub fn to_frontmatter(&self) -> String {
        let mut out = String::new();
        out.push_str(DELIMITER);
        out.push('\n');
        for (key, value) in &self.0 {
            let rendered = match value {
                FieldValue::Text(s) => render_scalar(key, s),
                FieldValue::List(items) => json_string(items),
            };
            let _ = writeln!(out, "{key}: {rendered}");
        }
        out.push_str(DELIMITER);
        out.push('\n');
        out
    }
}

impl FromIterator<(String, FieldValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A parsed content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Decoded metadata block.
    pub metadata: Metadata,
    /// Trimmed body following the closing delimiter.
    pub body: String,
}

/// Split content into the raw metadata block and the body.
///
/// The content must open with a `---` line and contain a closing `---` line.
/// Trailing whitespace on either delimiter line is ignored. Expects `\n` line
/// endings.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let (opening, rest) = content.split_once('\n')?;
    if opening.trim_end() != DELIMITER {
        return None;
    }

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let block = &rest[..offset];
            let block = block.strip_suffix('\n').unwrap_or(block);
            return Some((block, &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// Decode the lines of a metadata block.
///
/// Lines without a colon, or with an empty key, are skipped.
pub fn parse_metadata(block: &str) -> Metadata {
    let mut metadata = Metadata::new();

    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        metadata.insert(key, parse_value(key, value.trim()));
    }

    metadata
}

/// Parse a content file into metadata and body.
pub fn parse_document(content: &str, path: &Path) -> Result<Document> {
    let normalized = content.replace("\r\n", "\n");
    let (block, body) = split_frontmatter(&normalized).ok_or_else(|| {
        CoreError::malformed(path, "missing `---` delimited frontmatter block")
    })?;

    Ok(Document {
        metadata: parse_metadata(block),
        body: body.trim().to_string(),
    })
}

fn parse_value(key: &str, raw: &str) -> FieldValue {
    if let Some(items) = parse_bracketed(raw) {
        return FieldValue::List(items);
    }

    if key == TAGS_KEY {
        return FieldValue::List(split_list(raw));
    }

    FieldValue::Text(unquote(raw))
}

/// Decode `[...]` as a JSON string array, falling back to a comma split.
fn parse_bracketed(raw: &str) -> Option<Vec<String>> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;

    if let Ok(items) = serde_json::from_str::<Vec<String>>(raw) {
        return Some(items);
    }

    Some(split_list(inner))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
        .collect()
}

/// Strip one pair of matching surrounding quotes.
fn unquote(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return serde_json::from_str::<String>(raw)
            .unwrap_or_else(|_| raw[1..raw.len() - 1].to_string());
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }
    raw.to_string()
}

fn render_scalar(key: &str, value: &str) -> String {
    let needs_quotes = key == TAGS_KEY
        || value != value.trim()
        || value.contains('\n')
        || (value.starts_with('[') && value.ends_with(']'))
        || value.starts_with('"')
        || value.starts_with('\'');

    if needs_quotes {
        json_string(value)
    } else {
        value.to_string()
    }
}

fn json_string<T: Serialize + ?Sized>(value: &T) -> String {
    // Serializing strings and string slices cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}
