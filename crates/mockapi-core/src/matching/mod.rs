//! URL matching for route patterns.

mod url;

pub use url::{normalize_url, UrlMatch, UrlPattern};
