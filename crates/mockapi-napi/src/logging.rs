//! Log output for the native module.

use napi_derive::napi;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "mockapi_core=info";

/// Install a stderr log subscriber.
///
/// @param filter - `RUST_LOG`-style directives; falls back to `RUST_LOG`,
/// then to `mockapi_core=info`
/// @returns false if a subscriber was already installed
#[napi]
pub fn init_logging(filter: Option<String>) -> bool {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).ok(),
        None => EnvFilter::try_from_default_env().ok(),
    }
    .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
