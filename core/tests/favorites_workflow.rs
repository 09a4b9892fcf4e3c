use std::sync::Arc;

use newsdesk_core::models::{to_news_items, Post};
use newsdesk_core::state::{filter_posts, Action, Store, FAVORITES_STORAGE_KEY};
use newsdesk_core::storage::{Database, KeyValueStore, PostRepository, SqliteKeyValueStore};
use tempfile::tempdir;

fn scenario_posts() -> Vec<Post> {
    vec![
        Post::new("1", "React Native Testing", "How to test mobile components"),
        Post::new("2", "JavaScript Fundamentals", "Scopes, closures and prototypes"),
        Post::new("3", "Mobile App Design", "Designing for small screens"),
    ]
}

fn open_store(db: &Database) -> Store {
    let conn = db.open().unwrap();
    Store::new(Arc::new(SqliteKeyValueStore::new(conn)))
}

#[test]
fn search_scenario() {
    let filtered = filter_posts(&scenario_posts(), "react");
    let ids: Vec<_> = filtered.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1"]);
}

#[tokio::test]
async fn favorites_survive_a_restart() {
    let dir = tempdir().unwrap();
    let db = Database::new(dir.path().join("newsdesk.db"));

    {
        let store = open_store(&db);
        store.dispatch(Action::SetPosts(scenario_posts()));
        store.load_favorites().await;
        assert_eq!(store.favorites_count(), 0);

        store.toggle_favorite_with_persistence("1").await.unwrap();
        store.toggle_favorite_with_persistence("3").await.unwrap();
    }

    let store = open_store(&db);
    store.dispatch(Action::SetPosts(scenario_posts()));
    store.load_favorites().await;

    assert_eq!(store.favorite_ids().as_slice(), ["1", "3"]);
    assert!(!store.is_loading_favorites());

    let favorites: Vec<_> = store.favorite_posts().iter().map(|p| p.id.clone()).collect();
    assert_eq!(favorites, ["1", "3"]);
    assert_eq!(store.favorites_count(), 2);
}

#[tokio::test]
async fn persisted_value_tracks_memory_after_each_toggle() {
    let dir = tempdir().unwrap();
    let db = Database::new(dir.path().join("newsdesk.db"));
    let conn = db.open().unwrap();
    let kv = SqliteKeyValueStore::new(conn);
    let store = Store::new(Arc::new(kv.clone()));

    for id in ["2", "1", "2", "4"] {
        store.toggle_favorite_with_persistence(id).await.unwrap();

        let persisted = kv.get(FAVORITES_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(persisted, store.favorite_ids().to_json().unwrap());
    }

    assert_eq!(store.favorite_ids().as_slice(), ["1", "4"]);
}

#[tokio::test]
async fn cached_feed_feeds_the_store() {
    let dir = tempdir().unwrap();
    let db = Database::new(dir.path().join("newsdesk.db"));
    let mut conn = db.open().unwrap();
    PostRepository::replace_all(&mut conn, &scenario_posts()).unwrap();

    let store = open_store(&db);
    store.dispatch(Action::SetPosts(PostRepository::get_all(&conn).unwrap()));
    store.dispatch(Action::SetSearchQuery("  MOBILE ".to_string()));

    let shown = to_news_items(&store.posts_to_display());
    let ids: Vec<_> = shown.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
    assert!(shown.iter().all(|n| n.category == "General"));

    store.dispatch(Action::ClearSearch);
    assert_eq!(store.posts_to_display().len(), 3);
}
