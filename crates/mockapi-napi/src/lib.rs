//! NAPI-RS bindings for the users/groups mock API.
//!
//! Exposes the Rust mock server to Node.js.

use napi_derive::napi;

mod logging;
mod server;

pub use logging::*;
pub use server::*;

/// Library version
#[napi]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
