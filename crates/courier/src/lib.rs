//! # Courier
//!
//! A request dispatcher core. Given routes supplied by a registration step,
//! Courier matches an incoming verb and path to a handler, builds the
//! handler's arguments from request data, calls it, and turns the reply into
//! a rendering instruction.
//!
//! ## Crates
//!
//! | Module | Crate | Contents |
//! |--------|-------|----------|
//! | [`core`] | `courier-core` | Values, objects, schemas, coercion, sessions, replies, errors |
//! | [`router`] | `courier-router` | Path patterns and the first-match route table |
//! | [`extract`] | `courier-extract` | Request data, object mapping, binding, rendering |
//! | [`server`] | `courier-server` | Route definitions, registry, dispatcher, outcomes |
//! | [`telemetry`] | `courier-telemetry` | Logging setup |
//! | [`config`] | `courier-config` | Layered configuration |
//!
//! ## Example
//!
//! ```rust
//! use courier::prelude::*;
//!
//! let registry = RouteRegistry::builder()
//!     .route(
//!         RouteDefinition::new("/greet/{name}", |args| {
//!             Ok(format!("Hello, {}!", args.str("name").unwrap_or("stranger")))
//!         })
//!         .param(ParamSpec::text("name")),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::with_defaults(registry);
//! let outcome = dispatcher.dispatch(&DispatchRequest::new("GET", "/greet/Ada"));
//! assert_eq!(&outcome.body().unwrap()[..], b"Hello, Ada!");
//! ```

#![doc(html_root_url = "https://docs.rs/courier/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use courier_config as config;
pub use courier_core as core;
pub use courier_extract as extract;
pub use courier_router as router;
pub use courier_server as server;
pub use courier_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```rust
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use courier_core::{
        CourierError, CourierResult, Degradation, DegradationKind, FieldShape, MemorySession,
        ModelView, Object, ObjectSchema, ParamKind, ParamSpec, Reply, ScalarType, Session,
        SessionStore, Value,
    };

    pub use courier_extract::{BoundArguments, Part, RenderInstruction, RequestData, ResponseMode};

    pub use courier_server::{
        DispatchRequest, Dispatcher, DispatcherConfig, Outcome, RouteDefinition, RouteRegistry,
    };

    pub use courier_config::{ConfigLoader, CourierConfig};

    pub use courier_telemetry::{init_logging, LogConfig};
}
