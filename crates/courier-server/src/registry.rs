//! The immutable route registry.
//!
//! Built once from the registration step's [`RouteDefinition`]s, then shared
//! read-only by every request. Insertion order is match priority.

use courier_config::DispatcherConfig;
use courier_core::CourierError;
use courier_router::{Route, RouteMatch, Router};

use crate::definition::{RouteDefinition, RouteEntry};

/// Ordered, immutable route table.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    router: Router<RouteEntry>,
}

impl RouteRegistry {
    /// Starts a registry builder with default verb `GET`.
    #[must_use]
    pub fn builder() -> RouteRegistryBuilder {
        RouteRegistryBuilder::new()
    }

    /// Starts a registry builder whose default verb comes from `config`.
    #[must_use]
    pub fn builder_for(config: &DispatcherConfig) -> RouteRegistryBuilder {
        RouteRegistryBuilder::from_config(config)
    }

    /// Finds the first route accepting `verb` and `path`.
    #[must_use]
    pub fn match_route(&self, verb: &str, path: &str) -> Option<RouteMatch<'_, RouteEntry>> {
        self.router.match_route(verb, path)
    }

    /// Iterates over routes in priority order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<RouteEntry>> {
        self.router.iter()
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.router.len()
    }

    /// Whether the registry has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.router.is_empty()
    }
}

/// Collects definitions, then compiles them into a [`RouteRegistry`].
#[derive(Debug)]
pub struct RouteRegistryBuilder {
    default_verb: String,
    definitions: Vec<RouteDefinition>,
}

impl Default for RouteRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteRegistryBuilder {
    /// Creates an empty builder with default verb `GET`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default_verb: "GET".to_string(),
            definitions: Vec::new(),
        }
    }

    /// Creates an empty builder using `config.default_verb`.
    #[must_use]
    pub fn from_config(config: &DispatcherConfig) -> Self {
        Self::new().default_verb(config.default_verb.as_str())
    }

    /// Sets the verb given to definitions that do not name one.
    #[must_use]
    pub fn default_verb(mut self, verb: impl Into<String>) -> Self {
        self.default_verb = verb.into();
        self
    }

    /// Appends a definition.
    #[must_use]
    pub fn route(mut self, definition: RouteDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Appends several definitions in order.
    #[must_use]
    pub fn routes(mut self, definitions: impl IntoIterator<Item = RouteDefinition>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    /// Compiles every pattern.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::InvalidRoute`] for the first definition whose
    /// verb or pattern is rejected.
    pub fn build(self) -> Result<RouteRegistry, CourierError> {
        let mut router = Router::new();

        for definition in self.definitions {
            let (verb, pattern, entry) = definition.into_entry();
            let verb = verb.unwrap_or_else(|| self.default_verb.clone());
            router
                .insert(&verb, &pattern, entry)
                .map_err(|e| CourierError::invalid_route(&pattern, e.to_string()))?;
        }

        let summary: Vec<String> = router
            .iter()
            .take(5)
            .map(|r| format!("{} {}", r.method(), r.pattern()))
            .collect();
        tracing::info!(
            route_count = router.len(),
            routes = ?summary,
            "Route registry built"
        );

        Ok(RouteRegistry { router })
    }
}
