use super::{Storage, StorageError};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// In-memory storage.
///
/// Clones share the same underlying map, so a test can keep a handle and
/// inspect what the server persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    ///
    /// Every write is a single `insert`, so the map is still consistent after
    /// a poisoned lock and is read through the poison.
    pub fn len(&self) -> usize {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let data = self.data.read().map_err(|_| StorageError::Poisoned)?;
        Ok(data.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut data = self.data.write().map_err(|_| StorageError::Poisoned)?;
        data.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
