use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A news article as served by the API.
///
/// Fields the API does not interpret (`url`, `publishedAt`, ...) are kept in
/// `extra` and written back out untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "string_only", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_only", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "string_only", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        rename = "urlToImage",
        default,
        deserialize_with = "string_only",
        skip_serializing_if = "Option::is_none"
    )]
    pub url_to_image: Option<String>,
    #[serde(default, deserialize_with = "string_only", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "object_only", skip_serializing_if = "Option::is_none")]
    pub source: Option<Publisher>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    /// Builds an article from one raw record without rejecting it. Fields of
    /// an unexpected type read as absent; a record that is not an object
    /// reads as an empty article.
    pub fn from_record(record: Value) -> Self {
        match record {
            Value::Object(_) => serde_json::from_value(record).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }

    /// Text the keyword search runs against: title, description, content,
    /// author and source name, absent or empty parts skipped, lower-cased.
    pub fn search_blob(&self) -> String {
        [
            Some(self.title.as_str()),
            self.description.as_deref(),
            self.content.as_deref(),
            self.author.as_deref(),
            self.source_name(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    pub fn summary(&self, mode: CatalogMode) -> ArticleSummary {
        ArticleSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            image: self.url_to_image.clone(),
            category: match mode {
                CatalogMode::Curated => self.category.clone(),
                CatalogMode::Indexed => None,
            },
        }
    }
}

/// Publisher block of an article, e.g. `{"id": null, "name": "BBC News"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    #[serde(default, deserialize_with = "string_only", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Listing projection returned by the paginated endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// How a catalog assigns ids and filters by category.
///
/// `Indexed` numbers articles by position on every load and filters on the
/// publisher name. `Curated` keeps the ids shipped in the data file and
/// filters on the article's own `category` against a closed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    #[default]
    Indexed,
    Curated,
}

impl CatalogMode {
    pub fn uses_positional_ids(self) -> bool {
        matches!(self, CatalogMode::Indexed)
    }

    pub fn is_strict(self) -> bool {
        matches!(self, CatalogMode::Curated)
    }
}

impl std::fmt::Display for CatalogMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogMode::Indexed => write!(f, "indexed"),
            CatalogMode::Curated => write!(f, "curated"),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn string_or_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(string_only(deserializer)?.unwrap_or_default())
}

fn string_only<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn object_only<'de, D>(deserializer: D) -> std::result::Result<Option<Publisher>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}
