//! SQLite handle shared by every search

use std::path::Path;
use std::sync::Mutex;
use rusqlite::{Connection, OpenFlags};
use crate::{Error, Result};

/// Shared, read-mostly handle to the lookup database
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open an existing database file read-only
    pub fn open(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)?;
        Ok(Self::from_connection(conn))
    }

    /// Open an in-memory database seeded with an SQL script (for testing)
    pub fn open_in_memory(script: &str) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(script)?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already opened connection
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    /// Run `f` with exclusive access to the connection
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> T) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| Error::Unavailable("database connection lock poisoned".to_string()))?;
        Ok(f(&conn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::introspect;

    #[test]
    fn test_in_memory_script_is_applied() {
        let db = Database::open_in_memory(
            "CREATE TABLE chips (id TEXT, model TEXT); CREATE TABLE vendors (name TEXT);",
        )
        .unwrap();

        let tables = db.with_conn(introspect::list_tables).unwrap().unwrap();
        assert_eq!(tables, vec!["chips", "vendors"]);
    }

    #[test]
    fn test_open_read_only_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parts.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch("CREATE TABLE parts (pn TEXT)")
            .unwrap();

        let db = Database::open(&path).unwrap();
        let write = db
            .with_conn(|conn| conn.execute("INSERT INTO parts (pn) VALUES ('X')", []))
            .unwrap();
        assert!(write.is_err());
    }

    #[test]
    fn test_bad_script_fails() {
        assert!(Database::open_in_memory("CREATE TABL nope").is_err());
    }
}
