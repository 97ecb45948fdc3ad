//! Logging setup for Courier.
//!
//! Courier crates emit structured `tracing` events (route matches, argument
//! degradations, dispatch outcomes). This crate installs the subscriber that
//! formats them:
//!
//! - [`LogConfig`] - level directive, JSON or human-readable output, locations
//! - [`init_logging`] - installs the global `tracing-subscriber` registry
//! - [`fields`] - field names shared by every Courier event
//! - [`log_dispatch_start!`], [`log_dispatch_complete!`],
//!   [`log_dispatch_error!`] - the dispatcher's request log lines

#![doc(html_root_url = "https://docs.rs/courier-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig, LogFormat};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
