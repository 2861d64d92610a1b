//! Key-value store for QuizTrack.
//!
//! Provides the [`KvStore`] struct that wraps a `rusqlite::Connection`
//! and automatically runs schema migrations on open. Values are stored
//! as JSON text under a flat key namespace; the store is last-write-wins
//! with no transactional guarantee across keys, matching the consistency
//! model of the extension storage it replaces.

use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use crate::types::errors::StorageError;

use super::migrations;

/// Flat JSON key-value store over SQLite.
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Opens (or creates) a store at the given file path and runs migrations.
    ///
    /// # Errors
    /// Returns `StorageError` if the connection cannot be established or
    /// migrations fail.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::Database(e.to_string()))?;
        let store = Self { conn };
        store.run_migrations()?;
        Ok(store)
    }

    /// Opens an in-memory store and runs migrations.
    ///
    /// Useful for testing — the store is discarded when dropped.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn =
            Connection::open_in_memory().map_err(|e| StorageError::Database(e.to_string()))?;
        let store = Self { conn };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<(), StorageError> {
        migrations::run_all(&self.conn).map_err(|e| StorageError::Database(e.to_string()))
    }

    /// Reads and deserializes the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let row: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .map(Some)
            .or_else(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => Ok(None),
                other => Err(StorageError::Database(other.to_string())),
            })?;

        match row {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    /// Serializes and writes `value` under `key`, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let text =
            serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![key, text, now],
            )
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }

    /// Writes `value` only when `key` has never been written.
    ///
    /// Returns whether a write happened.
    pub fn set_if_absent<T: Serialize>(&self, key: &str, value: &T) -> Result<bool, StorageError> {
        if self.contains(key)? {
            return Ok(false);
        }
        self.set(key, value)?;
        Ok(true)
    }

    /// Whether the key has a stored value.
    pub fn contains(&self, key: &str) -> Result<bool, StorageError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM kv WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(count > 0)
    }

    /// Removes a key. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", [key])
            .map_err(|e| StorageError::Database(e.to_string()))?;
        Ok(())
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM kv ORDER BY key")
            .map_err(|e| StorageError::Database(e.to_string()))?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| StorageError::Database(e.to_string()))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(keys)
    }

    /// Reads a numeric counter, degrading to zero on any failure.
    ///
    /// Storage problems are logged, never surfaced: numeric displays fall
    /// back to zero rather than erroring.
    pub fn counter(&self, key: &str) -> u64 {
        match self.get::<u64>(key) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                tracing::warn!(key, error = %e, "counter read failed, defaulting to 0");
                0
            }
        }
    }
}
