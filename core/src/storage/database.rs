use crate::{Error, Result};
use rusqlite::Connection as SqliteConnection;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub type Connection = SqliteConnection;

/// Schema version written by `core/schema.sql`
pub const SCHEMA_VERSION: i32 = 1;

/// Several connections may share the file (CLI, background saves)
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Local cache database holding favorites and the last fetched feed.
pub struct Database {
    db_path: PathBuf,
}

impl Database {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Open the database, creating the file, its directory and the schema as needed.
    ///
    /// Fails if the file was written by an incompatible schema version.
    pub fn open(&self) -> Result<Connection> {
        if let Some(dir) = self.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let conn = SqliteConnection::open(&self.db_path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        prepare(&conn)?;

        tracing::debug!(path = %self.db_path.display(), "opened cache database");
        Ok(conn)
    }

    /// Throwaway database for tests and demos
    pub fn open_in_memory() -> Result<Connection> {
        let conn = SqliteConnection::open_in_memory()?;
        prepare(&conn)?;
        Ok(conn)
    }
}

/// Version recorded in the `metadata` table
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let version: String = conn.query_row(
        "SELECT value FROM metadata WHERE key = 'schema_version'",
        [],
        |row| row.get(0),
    )?;

    version
        .parse::<i32>()
        .map_err(|_| Error::InvalidInput(format!("Invalid schema version: {}", version)))
}

fn prepare(conn: &Connection) -> Result<()> {
    // every statement in the schema is IF NOT EXISTS / OR IGNORE
    conn.execute_batch(include_str!("../../schema.sql"))?;

    match schema_version(conn)? {
        SCHEMA_VERSION => Ok(()),
        other => Err(Error::InvalidInput(format!(
            "Unsupported schema version {} (expected {})",
            other, SCHEMA_VERSION
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_file_and_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("cache.db");

        let conn = Database::new(&db_path).open().unwrap();
        assert!(db_path.exists());
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("cache.db"));

        db.open()
            .unwrap()
            .execute("INSERT INTO kv_store (key, value, updated_at) VALUES ('k', 'v', 0)", [])
            .unwrap();

        let conn = db.open().unwrap();
        let value: String = conn
            .query_row("SELECT value FROM kv_store WHERE key = 'k'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(value, "v");
    }

    #[test]
    fn test_unknown_schema_version_is_rejected() {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("cache.db"));

        db.open()
            .unwrap()
            .execute("UPDATE metadata SET value = '7' WHERE key = 'schema_version'", [])
            .unwrap();

        assert!(matches!(db.open(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_in_memory() {
        let conn = Database::open_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }
}
