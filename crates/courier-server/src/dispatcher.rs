//! Per-request dispatch: match, bind, invoke, render.
//!
//! ```rust
//! use courier_core::{ParamSpec, ScalarType};
//! use courier_server::{DispatchRequest, Dispatcher, RouteDefinition, RouteRegistry};
//!
//! let registry = RouteRegistry::builder()
//!     .route(
//!         RouteDefinition::new("/user/{id}", |args| {
//!             Ok(format!("user #{}", args.i64("id").unwrap_or_default()))
//!         })
//!         .param(ParamSpec::primitive("id", ScalarType::Long)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::with_defaults(registry);
//! let outcome = dispatcher.dispatch(&DispatchRequest::new("GET", "/user/42"));
//! assert_eq!(outcome.status(), http::StatusCode::OK);
//! assert_eq!(&outcome.body().unwrap()[..], b"user #42");
//! ```

use std::sync::Arc;
use std::time::Instant;

use courier_config::DispatcherConfig;
use courier_core::{CourierError, Reply};
use courier_extract::{bind, render, render_into, AttributeScope, BoundArguments, RenderInstruction};
use courier_telemetry::{log_dispatch_complete, log_dispatch_error, log_dispatch_start};
use tracing::debug;

use crate::outcome::Outcome;
use crate::registry::RouteRegistry;
use crate::request::DispatchRequest;

/// Dispatches requests against a shared [`RouteRegistry`].
///
/// Cheap to clone; clones share the registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<RouteRegistry>,
    config: DispatcherConfig,
}

impl Dispatcher {
    /// Creates a dispatcher.
    pub fn new(registry: impl Into<Arc<RouteRegistry>>, config: DispatcherConfig) -> Self {
        Self {
            registry: registry.into(),
            config,
        }
    }

    /// Creates a dispatcher with the default configuration.
    pub fn with_defaults(registry: impl Into<Arc<RouteRegistry>>) -> Self {
        Self::new(registry, DispatcherConfig::default())
    }

    /// The route registry.
    #[must_use]
    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Dispatches one request.
    pub fn dispatch(&self, request: &DispatchRequest) -> Outcome {
        self.run(request, None)
    }

    /// Dispatches one request, copying view attributes into `scope`.
    pub fn dispatch_into(
        &self,
        request: &DispatchRequest,
        scope: &mut dyn AttributeScope,
    ) -> Outcome {
        self.run(request, Some(scope))
    }

    /// Removes the configured context path from `path`.
    ///
    /// Paths outside the context path are returned unchanged.
    #[must_use]
    pub fn strip_context_path<'a>(&self, path: &'a str) -> &'a str {
        let context = self.config.context_path.as_str();
        if context.is_empty() {
            return path;
        }
        match path.strip_prefix(context) {
            Some("") => "/",
            Some(rest) if rest.starts_with('/') => rest,
            _ => path,
        }
    }

    fn run(&self, request: &DispatchRequest, scope: Option<&mut dyn AttributeScope>) -> Outcome {
        let started = Instant::now();
        log_dispatch_start!(request.verb(), request.path());

        let path = self.strip_context_path(request.path());
        let Some(matched) = self.registry.match_route(request.verb(), path) else {
            debug!(
                http.method = %request.verb(),
                http.path = %path,
                "No route matched"
            );
            return Outcome::NotFound {
                verb: request.verb().to_string(),
                path: path.to_string(),
                message: format!("{}: {path}", self.config.not_found_message),
            };
        };

        let route = matched.pattern();
        let entry = matched.value();

        let result = bind(
            entry.params(),
            &matched.variables,
            request.data(),
            request.session(),
        )
        .and_then(|args| invoke(route, &args, |a| entry.invoke(a)).map(|reply| (args, reply)));

        let (args, reply) = match result {
            Ok(ok) => ok,
            Err(error) => return self.failed(route, error),
        };

        let instruction = match scope {
            Some(scope) => render_into(entry.mode(), reply, scope),
            None => render(entry.mode(), reply),
        };
        let content_type = match &instruction {
            RenderInstruction::Json(_) => Some(self.config.json_content_type.clone()),
            other => other.content_type().map(str::to_string),
        };

        let degradations = args.degradations().to_vec();
        let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
        log_dispatch_complete!(route, 200u16, degradations.len(), duration_ms);

        Outcome::Rendered {
            route: route.to_string(),
            instruction,
            degradations,
            content_type,
        }
    }

    fn failed(&self, route: &str, error: CourierError) -> Outcome {
        let status = error.status_code();
        log_dispatch_error!(route, status.as_u16(), error.detail());

        let message = if self.config.expose_error_detail {
            error.detail()
        } else {
            status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string()
        };
        Outcome::Failed { error, message }
    }
}

fn invoke<F>(route: &str, args: &BoundArguments, handler: F) -> Result<Reply, CourierError>
where
    F: FnOnce(&BoundArguments) -> anyhow::Result<Reply>,
{
    handler(args).map_err(|e| CourierError::handler(route, e))
}
