//! Article record supplied by the content layer.

use serde::{Deserialize, Serialize};

/// A tag as delivered by the CMS: either a bare string or an object with a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Name(String),
    Object { name: String },
}

impl Tag {
    pub fn name(&self) -> &str {
        match self {
            Tag::Name(name) => name,
            Tag::Object { name } => name,
        }
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::Name(name.to_string())
    }
}

/// Article metadata and HTML content, read-only to the analyzers.
///
/// Missing fields deserialize to empty values; analyzers treat empty strings the
/// same as absent ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    pub title: String,
    /// HTML markup, not plain text.
    pub content: String,
    pub excerpt: String,
    #[serde(alias = "categoryName")]
    pub category: String,
    /// `None` when the CMS sent no tags field; an empty list still counts as present.
    pub tags: Option<Vec<Tag>>,
    pub slug: String,
    #[serde(alias = "link")]
    pub url: String,
    pub date: Option<String>,
    pub published_date: Option<String>,
    pub schema: Option<serde_json::Value>,
    pub featured_image: Option<String>,
    pub read_time: Option<String>,
}

impl Article {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().flatten().map(Tag::name).collect()
    }

    /// Publication date from either `date` or `publishedDate`.
    pub fn any_date(&self) -> Option<&str> {
        self.date
            .as_deref()
            .or(self.published_date.as_deref())
            .filter(|d| !d.is_empty())
    }
}
