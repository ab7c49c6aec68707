//! Mock server entry points.

use crate::config::error::ConfigError;
use crate::config::seed::Seed;
use crate::config::settings::{MockConfig, StorageConfig};
use crate::error::ApiError;
use crate::mocks::handlers::api_router;
use crate::mocks::router::Router;
use crate::mocks::store::Store;
use crate::storage::{FileStorage, MemoryStorage, Storage, StorageError};
use serde_json::Value;

/// Call made by a client: URL plus optional payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub url: String,
    pub data: Value,
}

impl Request {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            data: Value::Null,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }
}

/// Users/groups mock backend.
///
/// `get`, `post`, `patch` and `del` all resolve the route from the URL
/// alone; the verb is only recorded in logs.
#[derive(Debug)]
pub struct MockServer {
    router: Router,
    store: Store,
    seed: Seed,
}

impl MockServer {
    /// Server starting from `seed`, mirroring mutations into `storage`.
    pub fn new(seed: Seed, storage: Box<dyn Storage>) -> Self {
        Self {
            router: api_router(),
            store: Store::new(seed.clone(), storage),
            seed,
        }
    }

    /// Server starting from whatever `storage` already holds, falling back
    /// to `seed` for missing collections.
    pub fn restore(seed: Seed, storage: Box<dyn Storage>) -> Result<Self, StorageError> {
        Ok(Self {
            router: api_router(),
            store: Store::restore(seed.clone(), storage)?,
            seed,
        })
    }

    pub fn from_config(config: &MockConfig) -> Result<Self, ConfigError> {
        let seed = match &config.seed {
            Some(pattern) => Seed::load(pattern)?,
            None => Seed::default(),
        };
        let storage: Box<dyn Storage> = match &config.storage {
            StorageConfig::Memory => Box::new(MemoryStorage::new()),
            StorageConfig::File { dir } => Box::new(FileStorage::open(dir)?),
        };

        tracing::info!(
            seed = ?config.seed,
            storage = ?config.storage,
            restore = config.restore,
            "Starting mock server"
        );

        if config.restore {
            Ok(Self::restore(seed, storage)?)
        } else {
            Ok(Self::new(seed, storage))
        }
    }

    /// Route `url` to its handler.
    pub fn dispatch(&mut self, url: &str, payload: &Value) -> Result<Value, ApiError> {
        self.router.dispatch(&mut self.store, url, payload)
    }

    pub fn get(&mut self, request: &Request) -> Result<Value, ApiError> {
        self.handle("GET", request)
    }

    pub fn post(&mut self, request: &Request) -> Result<Value, ApiError> {
        self.handle("POST", request)
    }

    pub fn patch(&mut self, request: &Request) -> Result<Value, ApiError> {
        self.handle("PATCH", request)
    }

    pub fn del(&mut self, request: &Request) -> Result<Value, ApiError> {
        self.handle("DELETE", request)
    }

    /// Drop every change and go back to the seed collections.
    pub fn reset(&mut self) -> Result<(), ApiError> {
        self.store.reset(self.seed.clone())?;
        tracing::info!("Mock state reset to seed");
        Ok(())
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn handle(&mut self, method: &'static str, request: &Request) -> Result<Value, ApiError> {
        let result = self.dispatch(&request.url, &request.data);
        match &result {
            Ok(_) => tracing::debug!(method, url = %request.url, "Request handled"),
            Err(e) => tracing::debug!(
                method,
                url = %request.url,
                status = e.status(),
                error = %e,
                "Request failed"
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::collection::EntityKind;
    use rstest::rstest;
    use serde_json::json;
    use std::fs;

    #[rstest]
    fn test_request_builder() {
        let request = Request::new("/api/users/create").with_data(json!({"name": "A"}));
        assert_eq!(request.url, "/api/users/create");
        assert_eq!(request.data, json!({"name": "A"}));
        assert_eq!(Request::new("/api/users").data, Value::Null);
    }

    #[rstest]
    fn test_verbs_share_routes() {
        let mut server = MockServer::new(Seed::default(), Box::new(MemoryStorage::new()));
        let request = Request::new("/api/users");
        assert_eq!(server.get(&request).unwrap(), json!([]));
        assert_eq!(server.post(&request).unwrap(), json!([]));
        assert_eq!(server.patch(&request).unwrap(), json!([]));
        assert_eq!(server.del(&request).unwrap(), json!([]));
    }

    #[rstest]
    fn test_reset_discards_changes() {
        let storage = MemoryStorage::new();
        let mut server = MockServer::new(Seed::default(), Box::new(storage.clone()));
        server
            .post(&Request::new("/api/groups/create").with_data(json!({"name": "G"})))
            .unwrap();
        assert_eq!(server.store().records(EntityKind::Group).len(), 1);

        server.reset().unwrap();
        assert!(server.store().records(EntityKind::Group).is_empty());
        assert_eq!(storage.get_item("groups").unwrap().as_deref(), Some("[]"));
    }

    #[rstest]
    fn test_from_config_with_file_storage_restores() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("seed.yaml"),
            "users:\n  - id: user1\n    name: Ann\n",
        )
        .unwrap();
        let config_path = dir.path().join("mock.yaml");
        fs::write(
            &config_path,
            "seed: seed.yaml\nstorage:\n  type: file\n  dir: state\nrestore: true\n",
        )
        .unwrap();
        let config = MockConfig::load(&config_path).unwrap();

        let mut server = MockServer::from_config(&config).unwrap();
        assert_eq!(server.store().records(EntityKind::User).len(), 1);
        server
            .post(&Request::new("/api/users/create").with_data(json!({"name": "Bob"})))
            .unwrap();
        assert!(dir.path().join("state").join("users.json").is_file());

        let restored = MockServer::from_config(&config).unwrap();
        let ids: Vec<&str> = restored
            .store()
            .records(EntityKind::User)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, ["user1", "user2"]);
    }

    #[rstest]
    fn test_from_config_missing_seed_fails() {
        let config = MockConfig {
            seed: Some("/nonexistent/dir/*.yaml".into()),
            ..MockConfig::default()
        };
        assert!(matches!(
            MockServer::from_config(&config),
            Err(ConfigError::NoFiles(_))
        ));
    }
}
