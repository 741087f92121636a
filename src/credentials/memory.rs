//! In-memory credential store

use crate::credentials::traits::{CredentialResult, CredentialStore};
use std::collections::HashMap;

/// `CredentialStore` backed by a `HashMap`; nothing is written to disk
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    entries: HashMap<String, String>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `value` under `key`
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> CredentialResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CredentialResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> CredentialResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
