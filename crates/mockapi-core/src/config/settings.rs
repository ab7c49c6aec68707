//! Mock server settings.

use crate::config::error::ConfigError;
use crate::config::parser::read_config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where persisted collections are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Process-local map
    #[default]
    Memory,
    /// One JSON file per collection in `dir`
    File { dir: String },
}

/// Mock server configuration.
///
/// ```yaml
/// seed: seeds/*.yaml
/// storage:
///   type: file
///   dir: .mock-state
/// restore: true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Glob pattern of seed files; no seed means empty collections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    pub storage: StorageConfig,
    /// Start from persisted collections when storage has them
    pub restore: bool,
}

impl MockConfig {
    /// Load settings from a YAML/JSON/JSONC file.
    ///
    /// Relative seed and storage paths are resolved against the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config: MockConfig = read_config(path)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &str| {
            if Path::new(p).is_absolute() {
                p.to_owned()
            } else {
                base.join(p).to_string_lossy().into_owned()
            }
        };

        self.seed = self.seed.as_deref().map(&resolve);
        if let StorageConfig::File { dir } = &mut self.storage {
            *dir = resolve(dir.as_str());
        }
    }
}
