use serde::{Deserialize, Deserializer, Serialize};

/// A single item of the news feed, as delivered by the upstream JSON API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_non_empty")]
    pub category: Option<String>,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub user_id: i64,
}

impl Post {
    /// Create a post with only the fields needed for searching
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            image: None,
            thumbnail: None,
            status: None,
            category: None,
            published_at: String::new(),
            updated_at: String::new(),
            user_id: 0,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_published_at(mut self, published_at: impl Into<String>) -> Self {
        self.published_at = published_at.into();
        self
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// `needle` must already be normalized (trimmed and lower-cased).
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// The feed sends numeric ids; favorites are keyed by their text form.
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Number(n) => n.to_string(),
        RawId::Text(s) => s,
    })
}

fn deserialize_non_empty<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
