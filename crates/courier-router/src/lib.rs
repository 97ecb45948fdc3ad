//! Ordered first-match route table for Courier.
//!
//! Routes are `(verb, pattern, value)` triples kept in registration order.
//! A pattern is literal text with `{name}` placeholders, each capturing one
//! path segment. Matching walks the table and returns the first route whose
//! verb (compared case-insensitively) and pattern both match.
//!
//! # Features
//!
//! - **Compile once**: patterns become anchored regular expressions at
//!   registration, never during matching
//! - **Exact fast path**: a path byte-equal to its pattern matches without
//!   running the expression
//! - **Positional capture**: values are bound to placeholder names in
//!   pattern order
//! - **Registration checks**: empty or repeated placeholder names are rejected
//!
//! # Example
//!
//! ```rust
//! use courier_router::Router;
//!
//! let mut router = Router::new();
//! router.insert("GET", "/user/{id}", "showUser").unwrap();
//!
//! let m = router.match_route("GET", "/user/42").unwrap();
//! assert_eq!(*m.value(), "showUser");
//! assert_eq!(m.variables.get("id"), Some("42"));
//!
//! assert!(router.match_route("GET", "/user/42/extra").is_none());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod pattern;
mod router;
mod variables;

pub use error::RouteError;
pub use pattern::PathPattern;
pub use router::{Route, Router};
pub use variables::PathVariables;

/// A matched route together with the variables captured from the path.
#[derive(Debug)]
pub struct RouteMatch<'a, T> {
    /// The matched route.
    pub route: &'a Route<T>,
    /// Captured path variables.
    pub variables: PathVariables,
}

impl<'a, T> RouteMatch<'a, T> {
    /// Creates a new route match.
    #[must_use]
    pub fn new(route: &'a Route<T>, variables: PathVariables) -> Self {
        Self { route, variables }
    }

    /// The value attached to the matched route.
    #[must_use]
    pub fn value(&self) -> &'a T {
        self.route.value()
    }

    /// The matched route's pattern text.
    #[must_use]
    pub fn pattern(&self) -> &'a str {
        self.route.pattern().as_str()
    }
}
