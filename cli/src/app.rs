use anyhow::{anyhow, Context, Result};
use newsdesk_core::{
    models::{to_news_items, FavoritesCounter, NewsItem, User},
    selectors::filtered_and_sorted_users,
    source::{JsonFilePostSource, JsonFileUserSource, PostSource, SamplePostSource, SampleUserSource, UserSource},
    state::{Action, SortBy, SortOrder, Store, UsersAction, UsersState},
    storage::{Connection, Database, PostRepository, SqliteKeyValueStore},
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Config;

/// Application state shared by all commands
pub struct App {
    pub store: Store,
    pub config: Config,
    db_connection: Arc<Mutex<Connection>>,
}

/// Outcome of a `refresh`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Fetched(usize),
    /// The source failed; the cached feed stays in place
    UsedCache(usize),
}

impl App {
    /// Open (or create) the cache database and build the store on top of it
    pub fn new(db_path: &Path, config: Config) -> Result<Self> {
        let db = Database::new(db_path);
        let conn = db
            .open()
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;
        let db_connection = Arc::new(Mutex::new(conn));

        let kv = SqliteKeyValueStore::from_shared(Arc::clone(&db_connection));
        let store = Store::new(Arc::new(kv));

        Ok(Self {
            store,
            config,
            db_connection,
        })
    }

    /// Populate the store from the cache, seeding it with the sample feed on first run,
    /// then load persisted favorites.
    pub async fn initialize(&mut self) -> Result<()> {
        let mut posts = PostRepository::get_all(&self.lock_db())?;

        if posts.is_empty() {
            tracing::info!("post cache is empty, seeding with the sample feed");
            posts = SamplePostSource.fetch_posts().await?;
            PostRepository::replace_all(&mut self.lock_db(), &posts)?;
        }

        self.store.dispatch(Action::SetPosts(posts));
        self.store.load_favorites().await;
        Ok(())
    }

    /// Posts to show for `query` (everything when it is blank or absent)
    pub fn list(&self, query: Option<&str>) -> Vec<NewsItem> {
        match query {
            Some(q) => self.store.dispatch(Action::SetSearchQuery(q.to_string())),
            None => self.store.dispatch(Action::ClearSearch),
        }
        to_news_items(&self.store.posts_to_display())
    }

    pub fn show(&self, id: &str) -> Result<(NewsItem, bool)> {
        let post = self
            .store
            .post(id)
            .ok_or_else(|| anyhow!("Post not found: {}", id))?;
        Ok((NewsItem::from(&post), self.store.is_post_favorite(id)))
    }

    pub fn favorites(&self) -> Vec<NewsItem> {
        to_news_items(&self.store.favorite_posts())
    }

    /// Toggle a favorite and wait for it to be written.
    ///
    /// Returns whether the post is a favorite afterwards.
    pub async fn toggle(&self, id: &str) -> Result<bool> {
        if self.store.post(id).is_none() {
            tracing::warn!(post_id = id, "toggling favorite for a post that is not in the feed");
        }

        // A short-lived process has to wait, or the write dies with the runtime.
        self.store.toggle_favorite_with_persistence(id).await?;
        Ok(self.store.is_post_favorite(id))
    }

    /// Re-fetch the feed and write it through to the cache.
    ///
    /// A failing source is logged and the cached feed is kept.
    pub async fn refresh(&self, from: Option<PathBuf>) -> Result<RefreshOutcome> {
        let source: Box<dyn PostSource> = match from.or_else(|| self.config.feed_path.clone()) {
            Some(path) => Box::new(JsonFilePostSource::new(path)),
            None => Box::new(SamplePostSource),
        };

        match self.store.refresh_posts(source.as_ref()).await {
            Ok(count) => {
                let posts = self.store.state().posts().clone();
                PostRepository::replace_all(&mut self.lock_db(), &posts)?;
                tracing::info!(count, "feed refreshed");
                Ok(RefreshOutcome::Fetched(count))
            }
            Err(e) => {
                tracing::warn!(error = %e, "feed refresh failed, keeping cached posts");
                Ok(RefreshOutcome::UsedCache(self.store.state().posts().len()))
            }
        }
    }

    /// Fetch the user directory, then search and sort it.
    ///
    /// Reads `from`, else the configured `users_path`, else the built-in directory.
    pub async fn users(
        &self,
        from: Option<PathBuf>,
        search: Option<String>,
        sort_by: SortBy,
        sort_order: SortOrder,
    ) -> Result<Vec<User>> {
        let source: Box<dyn UserSource> = match from.or_else(|| self.config.users_path.clone()) {
            Some(path) => Box::new(JsonFileUserSource::new(path)),
            None => Box::new(SampleUserSource),
        };
        let users = source.fetch_users().await.context("Failed to load users")?;

        let mut state = UsersState::new();
        if let Some(term) = search {
            state.reduce(UsersAction::SetSearchTerm(term));
        }
        state.reduce(UsersAction::SetSortBy(sort_by));
        state.reduce(UsersAction::SetSortOrder(sort_order));

        let shown = filtered_and_sorted_users(&users, state.filters());
        tracing::info!(total = users.len(), shown = shown.len(), "user directory loaded");
        Ok(shown)
    }

    pub fn counter(&self) -> FavoritesCounter {
        FavoritesCounter::new(self.store.favorites_count(), self.config.show_zero_favorites)
    }

    fn lock_db(&self) -> MutexGuard<'_, Connection> {
        self.db_connection.lock().unwrap_or_else(|e| e.into_inner())
    }
}
