//! Mock server class for Node.js.

use mockapi_core::config::settings::MockConfig;
use mockapi_core::storage::MemoryStorage;
use mockapi_core::types::collection::EntityKind;
use mockapi_core::types::record::Record;
use mockapi_core::{ApiError, MockServer as CoreMockServer, Request as CoreRequest};
use napi::bindgen_prelude::*;
use napi_derive::napi;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

/// Mock request: URL plus optional payload
#[napi(object)]
pub struct MockRequest {
    pub url: String,
    pub data: Option<Value>,
}

impl From<MockRequest> for CoreRequest {
    fn from(r: MockRequest) -> Self {
        CoreRequest::new(r.url).with_data(r.data.unwrap_or(Value::Null))
    }
}

/// Users/groups mock server
#[napi]
pub struct MockServer {
    inner: Arc<Mutex<CoreMockServer>>,
}

#[napi]
impl MockServer {
    /// Create a mock server
    ///
    /// @param configPath - Optional YAML/JSON config file; without it the
    /// server starts empty with in-memory storage
    #[napi(constructor)]
    pub fn new(config_path: Option<String>) -> Result<Self> {
        let server = match config_path {
            Some(path) => {
                let config = MockConfig::load(&path)
                    .map_err(|e| Error::from_reason(format!("Failed to load config: {e}")))?;
                CoreMockServer::from_config(&config)
                    .map_err(|e| Error::from_reason(format!("Failed to start mock server: {e}")))?
            }
            None => CoreMockServer::new(Default::default(), Box::new(MemoryStorage::new())),
        };

        Ok(Self {
            inner: Arc::new(Mutex::new(server)),
        })
    }

    /// @throws Error with message `"<status> <reason>"` (400 or 404)
    #[napi]
    pub fn get(&self, request: MockRequest) -> Result<Value> {
        let request = CoreRequest::from(request);
        self.lock()?.get(&request).map_err(to_napi_error)
    }

    /// @throws Error with message `"<status> <reason>"` (400 or 404)
    #[napi]
    pub fn post(&self, request: MockRequest) -> Result<Value> {
        let request = CoreRequest::from(request);
        self.lock()?.post(&request).map_err(to_napi_error)
    }

    /// @throws Error with message `"<status> <reason>"` (400 or 404)
    #[napi]
    pub fn patch(&self, request: MockRequest) -> Result<Value> {
        let request = CoreRequest::from(request);
        self.lock()?.patch(&request).map_err(to_napi_error)
    }

    /// @throws Error with message `"<status> <reason>"` (400 or 404)
    #[napi]
    pub fn del(&self, request: MockRequest) -> Result<Value> {
        let request = CoreRequest::from(request);
        self.lock()?.del(&request).map_err(to_napi_error)
    }

    /// Restore the seed collections
    #[napi]
    pub fn reset(&self) -> Result<()> {
        self.lock()?.reset().map_err(to_napi_error)
    }

    /// Current users
    #[napi]
    pub fn users(&self) -> Result<Vec<Value>> {
        Ok(records(self.lock()?.store().records(EntityKind::User)))
    }

    /// Current groups
    #[napi]
    pub fn groups(&self) -> Result<Vec<Value>> {
        Ok(records(self.lock()?.store().records(EntityKind::Group)))
    }

    /// Current user/group relations
    #[napi]
    pub fn relations(&self) -> Result<Vec<Value>> {
        let server = self.lock()?;
        server
            .store()
            .relations()
            .iter()
            .map(|r| serde_json::to_value(r).map_err(|e| Error::from_reason(e.to_string())))
            .collect()
    }

    fn lock(&self) -> Result<MutexGuard<'_, CoreMockServer>> {
        self.inner
            .lock()
            .map_err(|_| Error::from_reason("mock server lock poisoned"))
    }
}

fn records(records: &[Record]) -> Vec<Value> {
    records.iter().map(Record::to_value).collect()
}

fn to_napi_error(e: ApiError) -> Error {
    Error::from_reason(format!("{} {}", e.status(), e))
}
