//! Key-value persistence used by the favorites workflow.
//!
//! [`KeyValueStore`] is the seam between the state container and whatever
//! actually persists data. [`SqliteKeyValueStore`] backs it with the cache
//! database, [`MemoryKeyValueStore`] keeps values in memory and records every
//! call, which makes it suitable for tests and demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Connection, KvRepository};
use crate::{Error, Result};

/// Asynchronous get/set of text values by key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`. `Ok(None)` if nothing is stored.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// [`KeyValueStore`] over the `kv_store` table of the cache database.
///
/// SQLite calls run on the blocking thread pool.
#[derive(Clone)]
pub struct SqliteKeyValueStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKeyValueStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Share an already-wrapped connection
    pub fn from_shared(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
        conn.lock()
            .map_err(|_| Error::Storage("database connection lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for SqliteKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = Arc::clone(&self.conn);
        let key = key.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = Self::lock(&conn)?;
            KvRepository::get(&conn, &key)
        })
        .await?
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = Arc::clone(&self.conn);
        let key = key.to_string();
        let value = value.to_string();

        tokio::task::spawn_blocking(move || {
            let conn = Self::lock(&conn)?;
            KvRepository::set(&conn, &key, &value)
        })
        .await?
    }
}

/// In-memory [`KeyValueStore`] that counts calls and can be told to fail.
///
/// Every call yields to the runtime once, like a real backend would.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    reads: Arc<Mutex<Vec<String>>>,
    writes: Arc<Mutex<Vec<(String, String)>>>,
    fail_reads: Arc<Mutex<bool>>,
    fail_writes: Arc<Mutex<bool>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without recording a write
    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }

    /// Current value under `key`, without recording a read
    pub fn value(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    /// Keys passed to [`KeyValueStore::get`], in call order
    pub fn reads(&self) -> Vec<String> {
        self.reads.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Key/value pairs passed to [`KeyValueStore::set`], in call order
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }
}

#[async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.reads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(key.to_string());
        tokio::task::yield_now().await;

        if *self.fail_reads.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(Error::Storage(format!("read of {} rejected", key)));
        }

        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((key.to_string(), value.to_string()));
        tokio::task::yield_now().await;

        if *self.fail_writes.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(Error::Storage(format!("write of {} rejected", key)));
        }

        self.insert(key, value);
        Ok(())
    }
}
