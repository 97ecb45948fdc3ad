//! # Courier Extract
//!
//! Turns normalized request data into handler arguments and handler replies
//! into rendering instructions.
//!
//! | Item | Role |
//! |------|------|
//! | [`RequestData`] / [`Part`] | Multi-valued parameters plus multipart parts |
//! | [`map_to_object`] | Rebuilds objects from `prefix.field[index].sub` keys |
//! | [`bind`] | Produces one [`BoundArguments`] entry per declared parameter |
//! | [`render::render`] | Maps a reply to a [`render::RenderInstruction`] |
//!
//! ## Example
//!
//! ```rust
//! use courier_core::{FieldShape, ObjectSchema, ParamSpec, Value};
//! use courier_extract::{bind, RequestData};
//! use courier_router::PathVariables;
//!
//! let dept = ObjectSchema::builder("Departement")
//!     .field("name", FieldShape::Text)
//!     .build();
//! let employee = ObjectSchema::builder("Employee")
//!     .field("name", FieldShape::Text)
//!     .field("departement", FieldShape::List(dept))
//!     .build();
//!
//! let data = RequestData::from_query(
//!     "e.name=Ada&e.departement%5B0%5D.name=R%26D&e.departement%5B1%5D.name=Eng",
//! )
//! .unwrap();
//! let params = [ParamSpec::object("e", &employee)];
//!
//! let args = bind(&params, &PathVariables::new(), &data, None).unwrap();
//! let e = args.get("e").and_then(Value::as_object).unwrap();
//! assert_eq!(e.get("name"), Some(&Value::from("Ada")));
//! assert_eq!(e.get("departement").and_then(Value::collection_len), Some(2));
//! ```

#![doc(html_root_url = "https://docs.rs/courier-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binder;
mod error;
mod mapper;
pub mod render;
mod request;

pub use binder::{bind, BoundArgument, BoundArguments};
pub use error::RequestDataError;
pub use mapper::{map_to_object, Mapped};
pub use render::{render, render_into, AttributeScope, JsonEnvelope, RenderInstruction, ResponseMode};
pub use request::{ParamMap, Part, RequestData};
