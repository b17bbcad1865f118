//! In-memory state store.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::{StateStore, StateStoreError};

/// Process-local [`StateStore`]. Records vanish when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StateStoreError> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StateStoreError> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.insert(key.to_owned(), bytes.to_vec());
        Ok(())
    }
}
