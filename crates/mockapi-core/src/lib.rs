//! In-memory users/groups mock API.
//!
//! Requests are matched by URL against a route table and run against three
//! collections (users, groups and their relations). Every mutation is mirrored
//! into a key-value [`Storage`](storage::Storage).

pub mod config;
pub mod error;
pub mod matching;
pub mod mocks;
pub mod storage;
pub mod types;

pub use error::ApiError;
pub use mocks::server::{MockServer, Request};
