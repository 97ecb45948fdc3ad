//! Typed configuration for Courier.
//!
//! - TOML and JSON files
//! - `COURIER__SECTION__KEY` environment overrides
//! - strict parsing: unknown fields are rejected
//! - validation on load
//!
//! # Example
//!
//! ```no_run
//! use courier_config::ConfigLoader;
//!
//! # fn main() -> Result<(), courier_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_dotenv()?
//!     .with_optional_file("courier.toml")?
//!     .with_env_prefix("COURIER")
//!     .load()?;
//!
//! courier_telemetry::init_logging(&config.log_config()).ok();
//! # Ok(())
//! # }
//! ```
//!
//! # File format
//!
//! ```toml
//! [dispatcher]
//! context_path = "/shop"
//! default_verb = "GET"
//! expose_error_detail = false
//! json_content_type = "application/json;charset=UTF-8"
//! not_found_message = "Route not found"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! span_events = false
//! include_location = false
//! ```

#![doc(html_root_url = "https://docs.rs/courier-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::CourierConfig;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{DispatcherConfig, LogFormat, LoggingSection};
