//! Durable key-value storage for progress state.
//!
//! Progress is mirrored to a small SQLite database holding exactly two
//! string-keyed entries: `done` (a JSON array of problem ids) and `points`
//! (a decimal string). The two keys are loaded and defaulted independently,
//! so a corrupt done entry does not discard a valid point total.

use std::collections::HashSet;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;
use tracing::warn;

/// Storage key for the JSON array of done problem ids
pub const KEY_DONE: &str = "done";
/// Storage key for the decimal point total
pub const KEY_POINTS: &str = "points";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("failed to create storage directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle to the progress database
pub struct ProgressDb {
    conn: Connection,
}

impl ProgressDb {
    /// Open (or create) the progress database at the given path
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open an in-memory database (used by tests)
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )?;
        Ok(Self { conn })
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Load the done set. A missing or unparsable entry defaults to empty.
    pub fn load_done(&self) -> HashSet<String> {
        let raw = match self.get(KEY_DONE) {
            Ok(Some(raw)) => raw,
            Ok(None) => return HashSet::new(),
            Err(e) => {
                warn!("failed to read done set from storage: {e}");
                return HashSet::new();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => ids.into_iter().collect(),
            Err(e) => {
                warn!("stored done set is not a valid id array, starting empty: {e}");
                HashSet::new()
            }
        }
    }

    /// Load the point total. A missing or unparsable entry defaults to zero.
    pub fn load_points(&self) -> f64 {
        let raw = match self.get(KEY_POINTS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return 0.0,
            Err(e) => {
                warn!("failed to read points from storage: {e}");
                return 0.0;
            }
        };
        match raw.trim().parse::<f64>() {
            Ok(points) => points,
            Err(_) => {
                warn!("stored point total {raw:?} is not numeric, starting at zero");
                0.0
            }
        }
    }

    /// Persist both keys in a single transaction
    pub fn save(&mut self, done: &HashSet<String>, points: f64) -> Result<(), StorageError> {
        let ids: Vec<&str> = done.iter().map(String::as_str).collect();
        let done_json = serde_json::to_string(&ids)?;
        let points_text = points.to_string();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (KEY_DONE, done_json.as_str()),
        )?;
        tx.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (KEY_POINTS, points_text.as_str()),
        )?;
        tx.commit()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn set_raw(&self, key: &str, value: &str) {
        self.conn
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                (key, value),
            )
            .unwrap();
    }
}
