//! Mock backend.
//!
//! - [`Store`](store::Store): owns the collections and persists them after every mutation
//! - [`Router`](router::Router): ordered route list, tried most-recently-registered first
//! - [`handlers`]: the users/groups route table
//! - [`MockServer`](server::MockServer): `get`/`post`/`patch`/`del` entry points

pub mod handlers;
pub mod router;
pub mod server;
pub mod store;
