//! # Courier Server
//!
//! Route registration and per-request dispatch.
//!
//! The registration step supplies an ordered list of [`RouteDefinition`]s.
//! They are compiled once into an immutable [`RouteRegistry`], which a
//! [`Dispatcher`] shares across requests. Each request goes through:
//!
//! 1. context path removal
//! 2. first-match route lookup
//! 3. argument binding
//! 4. handler invocation
//! 5. rendering
//!
//! and ends in an [`Outcome`]: rendered (200), not found (404) or failed
//! (500).
//!
//! ## Example
//!
//! ```rust
//! use courier_core::{ModelView, ParamSpec};
//! use courier_extract::RenderInstruction;
//! use courier_server::{DispatchRequest, Dispatcher, Outcome, RouteDefinition, RouteRegistry};
//! use courier_extract::RequestData;
//!
//! let registry = RouteRegistry::builder()
//!     .route(
//!         RouteDefinition::new("/hello", |args| {
//!             Ok(ModelView::new("hello.jsp").with("name", args.str("name").unwrap_or("world")))
//!         })
//!         .controller("HelloController", "hello")
//!         .param(ParamSpec::text("name")),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let dispatcher = Dispatcher::with_defaults(registry);
//! let request = DispatchRequest::new("GET", "/hello")
//!     .with_data(RequestData::new().with_param("name", "Ada"));
//!
//! match dispatcher.dispatch(&request) {
//!     Outcome::Rendered { instruction: RenderInstruction::ViewForward { view_path, .. }, .. } => {
//!         assert_eq!(view_path, "hello.jsp");
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/courier-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod definition;
mod dispatcher;
mod outcome;
mod registry;
mod request;

pub use courier_config::DispatcherConfig;
pub use definition::{Handler, RouteDefinition, RouteEntry};
pub use dispatcher::Dispatcher;
pub use outcome::Outcome;
pub use registry::{RouteRegistry, RouteRegistryBuilder};
pub use request::DispatchRequest;
