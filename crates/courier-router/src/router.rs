//! Ordered route table.
//!
//! This module provides the [`Router`] struct, the table the dispatcher
//! consults on every request.

use http::Method;
use tracing::{debug, trace};

use crate::error::RouteError;
use crate::pattern::PathPattern;
use crate::variables::PathVariables;
use crate::RouteMatch;

/// A single registered route: verb, compiled pattern and an attached value.
#[derive(Debug, Clone)]
pub struct Route<T> {
    method: Method,
    pattern: PathPattern,
    value: T,
}

impl<T> Route<T> {
    /// The route's HTTP verb.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The compiled path pattern.
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// The value attached at registration.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns true if `verb` names this route's method, ignoring case.
    #[must_use]
    pub fn accepts(&self, verb: &str) -> bool {
        self.method.as_str().eq_ignore_ascii_case(verb)
    }
}

/// An ordered, first-match route table.
///
/// Routes are tried in insertion order and the first one whose verb and
/// pattern both match wins. Registering the same (verb, pattern) twice is
/// allowed; the later entry is simply unreachable.
///
/// # Example
///
/// ```rust
/// use courier_router::Router;
///
/// let mut router = Router::new();
/// router.insert("GET", "/users", "listUsers").unwrap();
/// router.insert("GET", "/users/{id}", "getUser").unwrap();
///
/// let m = router.match_route("get", "/users/123").unwrap();
/// assert_eq!(*m.value(), "getUser");
/// assert_eq!(m.variables.get("id"), Some("123"));
/// ```
#[derive(Debug, Clone)]
pub struct Router<T> {
    routes: Vec<Route<T>>,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Appends a route.
    ///
    /// The verb is upper-cased before parsing, so `"get"` and `"GET"` register
    /// the same method. The pattern is compiled here, never during matching.
    pub fn insert(&mut self, verb: &str, pattern: &str, value: T) -> Result<(), RouteError> {
        let method = Method::from_bytes(verb.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| RouteError::invalid_verb(verb))?;
        let pattern = PathPattern::parse(pattern)?;

        trace!(method = %method, pattern = %pattern, "Registered route");
        self.routes.push(Route {
            method,
            pattern,
            value,
        });
        Ok(())
    }

    /// Finds the first route accepting `verb` whose pattern matches `path`.
    #[must_use]
    pub fn match_route(&self, verb: &str, path: &str) -> Option<RouteMatch<'_, T>> {
        for route in self.routes.iter().filter(|r| r.accepts(verb)) {
            if let Some(variables) = route.pattern.matches(path) {
                debug!(
                    http.method = verb,
                    http.path = path,
                    route = %route.pattern,
                    variables = variables.len(),
                    "Route matched"
                );
                return Some(RouteMatch::new(route, variables));
            }
        }

        debug!(http.method = verb, http.path = path, "No route matched");
        None
    }

    /// Matches using a typed [`Method`].
    #[must_use]
    pub fn match_method(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, T>> {
        self.match_route(method.as_str(), path)
    }

    /// Returns every route whose pattern matches `path`, regardless of verb.
    pub fn match_path<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = (&'a Route<T>, PathVariables)> + 'a {
        self.routes
            .iter()
            .filter_map(move |r| r.pattern.matches(path).map(|v| (r, v)))
    }

    /// Routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route<T>> {
        self.routes.iter()
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
