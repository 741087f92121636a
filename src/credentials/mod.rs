//! Credential module for persisting the user's API key
//!
//! This module handles the key-value store behind the session controller:
//! - The `CredentialStore` trait
//! - A SQLite implementation for real use
//! - An in-memory implementation for tests and throwaway sessions

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemoryCredentialStore;
pub use sqlite::SqliteCredentialStore;
pub use traits::{CredentialError, CredentialResult, CredentialStore};

use std::path::Path;

/// Opens the on-disk credential store
pub fn open_store(path: &Path) -> CredentialResult<SqliteCredentialStore> {
    SqliteCredentialStore::new(path)
}
