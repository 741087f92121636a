//! Credential store trait and error types
//!
//! This module defines the key-value interface the session controller uses
//! to persist the user's API key between runs.

use thiserror::Error;

/// Errors that can occur in a credential store
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for credential store operations
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Persistent string values under fixed keys
///
/// The controller reads one key at startup and overwrites it on demand.
/// Values never expire.
pub trait CredentialStore {
    /// Reads the value stored under `key`
    fn get(&self, key: &str) -> CredentialResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> CredentialResult<()>;

    /// Removes `key`; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> CredentialResult<()>;
}
