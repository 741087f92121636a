//! SQLite credential store
//!
//! This module provides a SQLite-based implementation of the CredentialStore trait.

use crate::credentials::schema::initialize_schema;
use crate::credentials::traits::{CredentialResult, CredentialStore};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite-backed credential store
pub struct SqliteCredentialStore {
    conn: Connection,
}

impl SqliteCredentialStore {
    /// Opens (or creates) the store at `path`
    ///
    /// Missing parent directories are created.
    pub fn new(path: &Path) -> CredentialResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory store
    pub fn new_in_memory() -> CredentialResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// When `key` was last written, as an RFC 3339 timestamp
    pub fn updated_at(&self, key: &str) -> CredentialResult<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT updated_at FROM credentials WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn get(&self, key: &str) -> CredentialResult<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM credentials WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn set(&mut self, key: &str, value: &str) -> CredentialResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO credentials (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        tracing::debug!("Stored credential under '{}'", key);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CredentialResult<()> {
        self.conn
            .execute("DELETE FROM credentials WHERE key = ?1", params![key])?;
        Ok(())
    }
}
