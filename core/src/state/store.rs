use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinHandle;

use super::{Action, PostsState};
use crate::models::{FavoriteIds, Post};
use crate::selectors::{self, FavoritePostsMemo};
use crate::source::PostSource;
use crate::storage::KeyValueStore;
use crate::Result;

/// Key under which the favorite ids are persisted
pub const FAVORITES_STORAGE_KEY: &str = "@favorites_posts";

/// Owns the [`PostsState`] and wires it to persistent storage.
///
/// Cloning is cheap and every clone shares the same state. Reducers run to
/// completion under a lock with no await point in between, so concurrent
/// callers always observe whole transitions.
#[derive(Clone)]
pub struct Store {
    state: Arc<Mutex<PostsState>>,
    storage: Arc<dyn KeyValueStore>,
    favorites_memo: Arc<Mutex<FavoritePostsMemo>>,
}

impl Store {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_state(PostsState::new(), storage)
    }

    pub fn with_state(state: PostsState, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            storage,
            favorites_memo: Arc::new(Mutex::new(FavoritePostsMemo::new())),
        }
    }

    /// Apply a transition to the shared state
    pub fn dispatch(&self, action: Action) {
        self.lock_state().reduce(action);
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PostsState {
        self.lock_state().clone()
    }

    /// Load persisted favorites once.
    ///
    /// Skipped while a load is in flight or when any favorite is already in
    /// memory. Missing, malformed or unreadable values load as an empty set.
    /// The loading flag is cleared even if this future is dropped early.
    pub async fn load_favorites(&self) {
        {
            let mut state = self.lock_state();
            if state.is_loading_favorites() || !state.favorite_ids().is_empty() {
                tracing::debug!(
                    loading = state.is_loading_favorites(),
                    favorites = state.favorite_ids().len(),
                    "favorites already loaded, skipping"
                );
                return;
            }
            state.reduce(Action::SetLoadingFavorites(true));
        }

        let _loading = LoadingGuard { store: self };

        let ids = match self.storage.get(FAVORITES_STORAGE_KEY).await {
            Ok(Some(raw)) if !raw.trim().is_empty() => FavoriteIds::from_json(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored favorites are malformed, starting empty");
                FavoriteIds::new()
            }),
            Ok(_) => FavoriteIds::new(),
            Err(e) => {
                tracing::error!(error = %e, "failed to load favorites");
                FavoriteIds::new()
            }
        };

        tracing::debug!(favorites = ids.len(), "favorites loaded");
        self.dispatch(Action::SetFavoriteIds(ids));
    }

    /// Persist a full snapshot of `ids` in the background.
    ///
    /// Failures are logged and swallowed; the in-memory state stays
    /// authoritative. Awaiting the handle is optional. Must be called from
    /// within a tokio runtime.
    pub fn save_favorites(&self, ids: FavoriteIds) -> JoinHandle<()> {
        let storage = Arc::clone(&self.storage);

        tokio::spawn(async move {
            let json = match ids.to_json() {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize favorites");
                    return;
                }
            };

            if let Err(e) = storage.set(FAVORITES_STORAGE_KEY, &json).await {
                tracing::error!(error = %e, "failed to save favorites");
            }
        })
    }

    /// Toggle `id` in memory, then persist the updated set in the background.
    ///
    /// The in-memory change is visible as soon as this returns. Writes from
    /// rapid successive toggles are not ordered against each other. Must be
    /// called from within a tokio runtime.
    pub fn toggle_favorite_with_persistence(&self, id: &str) -> JoinHandle<()> {
        let ids = {
            let mut state = self.lock_state();
            state.reduce(Action::ToggleFavorite(id.to_string()));
            FavoriteIds::clone(state.favorite_ids())
        };

        self.save_favorites(ids)
    }

    /// Fetch the feed from `source` and replace the post collection.
    ///
    /// On error the current posts are left untouched.
    pub async fn refresh_posts(&self, source: &dyn PostSource) -> Result<usize> {
        let posts = source.fetch_posts().await?;
        let count = posts.len();
        self.dispatch(Action::SetPosts(posts));
        Ok(count)
    }

    pub fn search_query(&self) -> String {
        self.lock_state().search_query().to_string()
    }

    pub fn is_loading_favorites(&self) -> bool {
        self.lock_state().is_loading_favorites()
    }

    pub fn favorite_ids(&self) -> Arc<FavoriteIds> {
        Arc::clone(self.lock_state().favorite_ids())
    }

    /// Filtered posts when a query is active, all posts otherwise
    pub fn posts_to_display(&self) -> Arc<Vec<Post>> {
        let state = self.lock_state();
        Arc::clone(selectors::posts_to_display(
            state.search_query(),
            state.filtered_posts(),
            state.posts(),
        ))
    }

    pub fn favorite_posts(&self) -> Arc<Vec<Post>> {
        let (posts, favorite_ids) = {
            let state = self.lock_state();
            (Arc::clone(state.posts()), Arc::clone(state.favorite_ids()))
        };

        self.favorites_memo
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&posts, &favorite_ids)
    }

    pub fn is_post_favorite(&self, id: &str) -> bool {
        selectors::is_post_favorite(self.lock_state().favorite_ids(), id)
    }

    pub fn favorites_count(&self) -> usize {
        selectors::favorites_count(self.lock_state().favorite_ids())
    }

    /// Find a loaded post by id
    pub fn post(&self, id: &str) -> Option<Post> {
        self.lock_state().posts().iter().find(|post| post.id == id).cloned()
    }

    fn lock_state(&self) -> MutexGuard<'_, PostsState> {
        // Reducers cannot leave the state half-updated, so a poisoned lock is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Clears the loading flag when a load finishes, however it finishes.
struct LoadingGuard<'a> {
    store: &'a Store,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.store.dispatch(Action::SetLoadingFavorites(false));
    }
}
