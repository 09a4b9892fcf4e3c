// Example: Basic usage of the newsdesk-core library
use std::sync::Arc;

use newsdesk_core::models::*;
use newsdesk_core::selectors;
use newsdesk_core::source::SamplePostSource;
use newsdesk_core::state::{Action, Store};
use newsdesk_core::storage::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("--- Basic Usage of newsdesk-core ---");

    // Initialize database
    let conn = Database::open_in_memory()?;
    println!("   ✓ Database created with schema version {}", schema_version(&conn)?);

    let store = Store::new(Arc::new(SqliteKeyValueStore::new(conn)));

    // ========== Load Feed ==========
    println!("\n1. Loading the sample feed...");
    let count = store.refresh_posts(&SamplePostSource).await?;
    println!("   ✓ Loaded {} posts", count);

    // ========== Favorites ==========
    println!("\n2. Loading favorites...");
    store.load_favorites().await;
    println!("   ✓ {} favorites in storage", store.favorites_count());

    store.toggle_favorite_with_persistence("4").await?;
    store.toggle_favorite_with_persistence("2").await?;
    for item in to_news_items(&store.favorite_posts()) {
        println!("   ★ [{}] {}", item.category, item.title);
    }
    println!("   {}", FavoritesCounter::new(store.favorites_count(), false).label());

    // ========== Search ==========
    println!("\n3. Searching for \"cities\"...");
    store.dispatch(Action::SetSearchQuery("cities".to_string()));
    let state = store.state();
    let shown = selectors::posts_to_display(state.search_query(), state.filtered_posts(), state.posts());
    for post in shown.iter() {
        println!("   → {}", post.title);
    }

    store.dispatch(Action::ClearSearch);
    println!("   ✓ Cleared search, {} posts shown", store.posts_to_display().len());

    Ok(())
}
