use std::sync::Arc;

use crate::models::{FavoriteIds, Post};

/// State transitions accepted by [`PostsState::reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replace the whole post collection
    SetPosts(Vec<Post>),
    /// Replace the raw search query
    SetSearchQuery(String),
    /// Reset the query and show everything
    ClearSearch,
    /// Replace the favorite ids wholesale (after a load)
    SetFavoriteIds(FavoriteIds),
    /// Add or remove a single favorite
    ToggleFavorite(String),
    SetLoadingFavorites(bool),
}

/// Post collection, search and favorites state.
///
/// Collections sit behind `Arc` so snapshots are cheap and selectors can
/// memoize on pointer identity. Every transition that changes a collection
/// installs a fresh `Arc`; nothing is mutated in place.
#[derive(Debug, Clone, Default)]
pub struct PostsState {
    posts: Arc<Vec<Post>>,
    favorite_ids: Arc<FavoriteIds>,
    search_query: String,
    filtered_posts: Arc<Vec<Post>>,
    is_loading_favorites: bool,
}

impl PostsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &Arc<Vec<Post>> {
        &self.posts
    }

    pub fn favorite_ids(&self) -> &Arc<FavoriteIds> {
        &self.favorite_ids
    }

    /// Raw query as typed, whitespace included
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Posts matching the current query (all posts when the query is blank)
    pub fn filtered_posts(&self) -> &Arc<Vec<Post>> {
        &self.filtered_posts
    }

    pub fn is_loading_favorites(&self) -> bool {
        self.is_loading_favorites
    }

    /// Apply a single transition
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::SetPosts(posts) => self.set_posts(posts),
            Action::SetSearchQuery(query) => self.set_search_query(query),
            Action::ClearSearch => self.clear_search(),
            Action::SetFavoriteIds(ids) => self.set_favorite_ids(ids),
            Action::ToggleFavorite(id) => {
                self.toggle_favorite(&id);
            }
            Action::SetLoadingFavorites(flag) => self.set_loading_favorites(flag),
        }
    }

    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = Arc::new(posts);
        self.filtered_posts = project(&self.posts, &self.search_query);
        tracing::debug!(
            posts = self.posts.len(),
            matches = self.filtered_posts.len(),
            "posts replaced"
        );
    }

    pub fn set_search_query(&mut self, query: String) {
        self.filtered_posts = project(&self.posts, &query);
        self.search_query = query;
        tracing::debug!(
            query = %self.search_query,
            matches = self.filtered_posts.len(),
            "search query updated"
        );
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.filtered_posts = Arc::clone(&self.posts);
    }

    pub fn set_favorite_ids(&mut self, ids: FavoriteIds) {
        self.favorite_ids = Arc::new(ids);
    }

    /// Returns `true` if `id` is a favorite after the toggle
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let mut ids = FavoriteIds::clone(&self.favorite_ids);
        let now_favorite = ids.toggle(id);
        self.favorite_ids = Arc::new(ids);
        tracing::debug!(post_id = id, favorite = now_favorite, "favorite toggled");
        now_favorite
    }

    pub fn set_loading_favorites(&mut self, flag: bool) {
        self.is_loading_favorites = flag;
    }
}

/// Posts whose title or content contains `query`, ignoring case.
///
/// The query is trimmed first; a blank query matches everything.
pub fn filter_posts(posts: &[Post], query: &str) -> Vec<Post> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return posts.to_vec();
    }

    posts.iter().filter(|post| post.matches(&needle)).cloned().collect()
}

/// Blank queries share the unfiltered allocation.
fn project(posts: &Arc<Vec<Post>>, query: &str) -> Arc<Vec<Post>> {
    if query.trim().is_empty() {
        Arc::clone(posts)
    } else {
        Arc::new(filter_posts(posts, query))
    }
}
