//! Where posts and users come from.
//!
//! The remote API client lives outside this crate; anything that can hand
//! back a list of [`Post`]s implements [`PostSource`], and likewise
//! [`UserSource`] for the user directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::models::{Post, User};
use crate::{Error, Result};

#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch the full feed
    async fn fetch_posts(&self) -> Result<Vec<Post>>;

    /// Fetch a single post by id
    async fn fetch_post(&self, id: &str) -> Result<Post> {
        self.fetch_posts()
            .await?
            .into_iter()
            .find(|post| post.id == id)
            .ok_or_else(|| Error::NotFound(format!("Post not found: {}", id)))
    }
}

/// Reads a JSON array of posts, in the upstream feed format, from disk.
#[derive(Debug, Clone)]
pub struct JsonFilePostSource {
    path: PathBuf,
}

impl JsonFilePostSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl PostSource for JsonFilePostSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let posts: Vec<Post> = serde_json::from_str(&raw)?;
        tracing::debug!(path = %self.path.display(), count = posts.len(), "read feed file");
        Ok(posts)
    }
}

/// Built-in feed used to seed an empty cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplePostSource;

#[async_trait]
impl PostSource for SamplePostSource {
    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        Ok(sample_posts())
    }
}

pub fn sample_posts() -> Vec<Post> {
    vec![
        Post::new(
            "1",
            "Advances in artificial intelligence reshape the tech industry",
            "The latest AI innovations are transforming sectors from medicine to education, promising a more efficient and automated future.",
        )
        .with_category("Technology")
        .with_image("https://images.unsplash.com/photo-1677442136019-21780ecad995?w=400&h=200&fit=crop")
        .with_published_at("2024-01-15T10:30:00Z"),
        Post::new(
            "2",
            "Scientific discovery could change cancer treatment",
            "Researchers develop a new therapy showing promising results in clinical trials, offering hope to millions of patients.",
        )
        .with_category("Health")
        .with_image("https://images.unsplash.com/photo-1559757148-5c350d0d3c56?w=400&h=200&fit=crop")
        .with_published_at("2024-01-14T15:45:00Z"),
        Post::new(
            "3",
            "New economic policy boosts local market growth",
            "The government announces measures to strengthen the national economy and create new job opportunities across sectors.",
        )
        .with_category("Economy")
        .with_published_at("2024-01-13T09:15:00Z"),
        Post::new(
            "4",
            "Climate change: new strategies for environmental conservation",
            "International organizations present initiatives to fight global warming and protect biodiversity.",
        )
        .with_category("Environment")
        .with_image("https://images.unsplash.com/photo-1569163139394-de44cb4749e4?w=400&h=200&fit=crop")
        .with_published_at("2024-01-12T14:20:00Z"),
        Post::new(
            "5",
            "Transport revolution: autonomous vehicles arrive in cities",
            "The first fleets of self-driving cars start operating in urban areas, marking a new era in mobility.",
        )
        .with_category("Transport")
        .with_image("https://images.unsplash.com/photo-1617788138017-80ad40651399?w=400&h=200&fit=crop")
        .with_published_at("2024-01-11T11:00:00Z"),
    ]
}

#[async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<User>>;

    async fn fetch_user(&self, id: i64) -> Result<User> {
        self.fetch_users()
            .await?
            .into_iter()
            .find(|user| user.id == id)
            .ok_or_else(|| Error::NotFound(format!("User not found: {}", id)))
    }
}

/// Reads a JSON array of users, in the upstream format, from disk.
#[derive(Debug, Clone)]
pub struct JsonFileUserSource {
    path: PathBuf,
}

impl JsonFileUserSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl UserSource for JsonFileUserSource {
    async fn fetch_users(&self) -> Result<Vec<User>> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let users: Vec<User> = serde_json::from_str(&raw)?;
        tracing::debug!(path = %self.path.display(), count = users.len(), "read user file");
        Ok(users)
    }
}

/// Built-in user directory used when no file is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleUserSource;

#[async_trait]
impl UserSource for SampleUserSource {
    async fn fetch_users(&self) -> Result<Vec<User>> {
        Ok(sample_users())
    }
}

pub fn sample_users() -> Vec<User> {
    let mut juan = User::new(1, "Juan", "Pérez", "juan.perez@email.com").with_company("Tech Solutions");
    juan.phone = "+54 11 1234-5678".to_string();
    juan.website = "juan-perez.com".to_string();
    juan.address.city = "Buenos Aires".to_string();

    let mut maria =
        User::new(2, "María", "González", "maria.gonzalez@email.com").with_company("Design Studio");
    maria.phone = "+54 11 9876-5432".to_string();
    maria.website = "maria-gonzalez.com".to_string();
    maria.address.city = "Buenos Aires".to_string();

    let mut lucas = User::new(3, "Lucas", "Fernández", "lucas.f@dataworks.io").with_company("DataWorks");
    lucas.phone = "+54 351 555-0199".to_string();
    lucas.address.city = "Córdoba".to_string();

    vec![juan, maria, lucas]
}
