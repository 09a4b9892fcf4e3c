use crate::models::datetime_to_timestamp;
use crate::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

pub struct KvRepository;

impl KvRepository {
    /// Get the value stored under `key`, if any
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    /// Insert or overwrite the value stored under `key`
    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, datetime_to_timestamp(&Utc::now())],
        )?;

        Ok(())
    }
}
