mod counter;
mod favorite;
mod news_item;
mod post;
mod user;

pub use counter::FavoritesCounter;
pub use favorite::FavoriteIds;
pub use news_item::{to_news_items, NewsItem, DEFAULT_CATEGORY, FEED_SOURCE, PLACEHOLDER_IMAGE_URL};
pub use post::Post;
pub use user::{Geo, User, UserAddress, UserCompany, UserLogin};

use chrono::{DateTime, Utc};

/// Convert DateTime<Utc> to Unix timestamp (seconds)
pub fn datetime_to_timestamp(datetime: &DateTime<Utc>) -> i64 {
    datetime.timestamp()
}
