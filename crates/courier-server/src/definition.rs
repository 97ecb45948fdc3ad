//! Route definitions handed over by the registration step.
//!
//! A [`RouteDefinition`] is what an external registration step produces for
//! one handler action: the controller and action names, an optional verb, the
//! path pattern, the declared parameters, the response mode and the callable.
//!
//! # Example
//!
//! ```rust
//! use courier_core::{ParamSpec, ScalarType};
//! use courier_server::RouteDefinition;
//!
//! let def = RouteDefinition::new("/user/{id}", |args| {
//!     Ok(format!("user {}", args.i64("id").unwrap_or_default()))
//! })
//! .controller("UserController", "show")
//! .param(ParamSpec::primitive("id", ScalarType::Long))
//! .json();
//!
//! assert_eq!(def.pattern(), "/user/{id}");
//! assert_eq!(def.declared_verb(), None);
//! ```

use std::fmt;
use std::sync::Arc;

use courier_core::{ParamSpec, Reply};
use courier_extract::{BoundArguments, ResponseMode};

/// A type-erased handler callable.
pub type Handler = Arc<dyn Fn(&BoundArguments) -> anyhow::Result<Reply> + Send + Sync>;

/// One route as supplied by registration.
#[derive(Clone)]
pub struct RouteDefinition {
    controller: String,
    action: String,
    verb: Option<String>,
    pattern: String,
    params: Vec<ParamSpec>,
    mode: ResponseMode,
    handler: Handler,
}

impl RouteDefinition {
    /// Creates a definition for `pattern` served by `handler`.
    ///
    /// The handler may return anything convertible into a [`Reply`].
    pub fn new<F, R>(pattern: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&BoundArguments) -> anyhow::Result<R> + Send + Sync + 'static,
        R: Into<Reply>,
    {
        Self {
            controller: String::new(),
            action: String::new(),
            verb: None,
            pattern: pattern.into(),
            params: Vec::new(),
            mode: ResponseMode::View,
            handler: Arc::new(move |args| handler(args).map(Into::into)),
        }
    }

    /// Sets the controller and action names.
    #[must_use]
    pub fn controller(mut self, controller: impl Into<String>, action: impl Into<String>) -> Self {
        self.controller = controller.into();
        self.action = action.into();
        self
    }

    /// Sets the verb. Without one, the registry's default verb applies.
    #[must_use]
    pub fn verb(mut self, verb: impl Into<String>) -> Self {
        self.verb = Some(verb.into());
        self
    }

    /// Shorthand for `verb("POST")`.
    #[must_use]
    pub fn post(self) -> Self {
        self.verb("POST")
    }

    /// Appends a declared parameter.
    #[must_use]
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Appends several declared parameters in order.
    #[must_use]
    pub fn params(mut self, specs: impl IntoIterator<Item = ParamSpec>) -> Self {
        self.params.extend(specs);
        self
    }

    /// Sets the response mode.
    #[must_use]
    pub fn mode(mut self, mode: ResponseMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `mode(ResponseMode::Json)`.
    #[must_use]
    pub fn json(self) -> Self {
        self.mode(ResponseMode::Json)
    }

    /// Returns the path pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the explicit verb, if any.
    #[must_use]
    pub fn declared_verb(&self) -> Option<&str> {
        self.verb.as_deref()
    }

    pub(crate) fn into_entry(self) -> (Option<String>, String, RouteEntry) {
        let entry = RouteEntry {
            controller: self.controller,
            action: self.action,
            params: self.params,
            mode: self.mode,
            handler: self.handler,
        };
        (self.verb, self.pattern, entry)
    }
}

impl fmt::Debug for RouteDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDefinition")
            .field("controller", &self.controller)
            .field("action", &self.action)
            .field("verb", &self.verb)
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// What the registry stores for each route.
#[derive(Clone)]
pub struct RouteEntry {
    controller: String,
    action: String,
    params: Vec<ParamSpec>,
    mode: ResponseMode,
    handler: Handler,
}

impl RouteEntry {
    /// Controller name.
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Action name.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Declared parameters, in call order.
    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Response mode.
    #[must_use]
    pub fn mode(&self) -> ResponseMode {
        self.mode
    }

    /// Calls the handler.
    pub fn invoke(&self, args: &BoundArguments) -> anyhow::Result<Reply> {
        (self.handler)(args)
    }
}

impl fmt::Debug for RouteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteEntry")
            .field("controller", &self.controller)
            .field("action", &self.action)
            .field("params", &self.params)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
