mod database;
mod kv_repository;
mod kv_store;
mod post_repository;

pub use database::{schema_version, Connection, Database, SCHEMA_VERSION};
pub use kv_repository::KvRepository;
pub use kv_store::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore};
pub use post_repository::PostRepository;
