use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Post;

/// Shown when a post carries neither an image nor a thumbnail
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1611974789855-9c2a0a7236a3?w=400&h=200&fit=crop";

/// Source label attached to every item of the feed
pub const FEED_SOURCE: &str = "JSONPlaceholder";

pub const DEFAULT_CATEGORY: &str = "General";

/// Timestamp layout used by the feed, e.g. `04/02/2023 13:25:21`
const FEED_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Display projection of a [`Post`] used by list and detail views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub published_at: String,
    pub source: String,
    pub category: String,
}

impl NewsItem {
    /// Parse `published_at` and render it as `15 January 2024, 10:30`.
    ///
    /// Returns `None` when the timestamp is in neither the feed layout nor RFC 3339.
    pub fn formatted_date(&self) -> Option<String> {
        parse_published_at(&self.published_at).map(|dt| dt.format("%-d %B %Y, %H:%M").to_string())
    }
}

impl From<&Post> for NewsItem {
    fn from(post: &Post) -> Self {
        let image_url = post
            .image
            .as_ref()
            .or(post.thumbnail.as_ref())
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());

        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            description: post.content.clone(),
            image_url,
            published_at: post.published_at.clone(),
            source: FEED_SOURCE.to_string(),
            category: post
                .category
                .clone()
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        }
    }
}

/// Transform a slice of posts, keeping their order
pub fn to_news_items(posts: &[Post]) -> Vec<NewsItem> {
    posts.iter().map(NewsItem::from).collect()
}

fn parse_published_at(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, FEED_DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_utc()))
}
