//! # Courier Core
//!
//! Core value model for the Courier request dispatcher.
//!
//! This crate provides the types every other Courier crate speaks:
//!
//! - [`Value`] - Dynamically typed request and reply values
//! - [`coerce`] - Best-guess conversion of a raw string into a [`Value`]
//! - [`ScalarType`] - Exact conversion to a declared scalar type
//! - [`ObjectSchema`] / [`Object`] - Object types the mapper can rebuild
//! - [`ParamSpec`] / [`ParamKind`] - Declared handler parameters
//! - [`Session`] - Handle over an external [`SessionStore`]
//! - [`ModelView`] / [`Reply`] - What handlers return
//! - [`CourierError`] / [`Degradation`] - Fatal and recovered failures

#![doc(html_root_url = "https://docs.rs/courier-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod coerce;
mod error;
mod object;
mod param;
mod reply;
mod scalar;
mod schema;
mod session;
mod value;

pub use coerce::{coerce, coerce_all, parse_bool_keyword, parse_date, parse_date_time, parse_decimal};
pub use error::{CourierError, CourierResult, Degradation, DegradationKind, ErrorCategory};
pub use object::Object;
pub use param::{ParamKind, ParamSpec};
pub use reply::{ModelView, Reply};
pub use scalar::{ConversionError, ScalarType};
pub use schema::{FieldSchema, FieldShape, ObjectSchema, ObjectSchemaBuilder};
pub use session::{MemorySession, Session, SessionStore};
pub use value::{Value, DATE_FORMAT, DATE_TIME_FORMAT};
