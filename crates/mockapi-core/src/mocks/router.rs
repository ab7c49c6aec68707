//! Route table and dispatch.

use crate::error::ApiError;
use crate::matching::{UrlMatch, UrlPattern};
use crate::mocks::store::Store;
use serde_json::Value;
use std::fmt;

/// Route handler: runs against the store with the captured path parameters
/// and the request payload.
pub type Handler =
    Box<dyn Fn(&mut Store, &UrlMatch, &Value) -> Result<Value, ApiError> + Send + Sync>;

/// A pattern and the handler it selects.
pub struct Route {
    pattern: UrlPattern,
    handler: Handler,
}

impl Route {
    pub fn template(&self) -> &str {
        self.pattern.template()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("template", &self.template())
            .finish_non_exhaustive()
    }
}

/// Ordered list of routes.
///
/// Lookup walks the list from the most recently defined route backwards and
/// stops at the first match, so later definitions shadow earlier ones.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. It takes precedence over every route defined before it.
    pub fn define<F>(&mut self, template: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut Store, &UrlMatch, &Value) -> Result<Value, ApiError> + Send + Sync + 'static,
    {
        self.routes.push(Route {
            pattern: UrlPattern::new(template),
            handler: Box::new(handler),
        });
        self
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Find the route that would handle `url`.
    pub fn find(&self, url: &str) -> Option<(&Route, UrlMatch)> {
        self.routes
            .iter()
            .rev()
            .find_map(|route| route.pattern.matches(url).map(|m| (route, m)))
    }

    /// Run the handler for `url`, or fail with `NotFound` when nothing matches.
    pub fn dispatch(
        &self,
        store: &mut Store,
        url: &str,
        payload: &Value,
    ) -> Result<Value, ApiError> {
        let Some((route, url_match)) = self.find(url) else {
            tracing::warn!(url = %url, "No route matched");
            return Err(ApiError::not_found("Not Found"));
        };

        tracing::debug!(url = %url, route = %route.template(), "Route matched");
        (route.handler)(store, &url_match, payload)
    }
}
