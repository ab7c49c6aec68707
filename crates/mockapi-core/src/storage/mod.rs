//! Key-value storage that mirrors the in-memory collections.
//!
//! - [`MemoryStorage`]: process-local map, the default backend
//! - [`FileStorage`]: one `<key>.json` file per entry in a directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::fmt::Debug;
use std::path::PathBuf;
use thiserror::Error;

/// Flat string key-value store.
pub trait Storage: Debug + Send {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in entry '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid storage key: '{0}'")]
    InvalidKey(String),
    #[error("storage lock poisoned")]
    Poisoned,
}
