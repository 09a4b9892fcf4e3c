mod posts;
mod store;
mod users;

pub use posts::{filter_posts, Action, PostsState};
pub use store::{Store, FAVORITES_STORAGE_KEY};
pub use users::{SortBy, SortOrder, UserFilters, UsersAction, UsersState};
