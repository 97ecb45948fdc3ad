//! Response rendering.
//!
//! A handler's [`Reply`] becomes a [`RenderInstruction`] according to the
//! route's [`ResponseMode`]:
//!
//! | Mode | Reply | Instruction |
//! |------|-------|-------------|
//! | [`ResponseMode::Json`] | list or map | envelope, `data = {count, items}` |
//! | [`ResponseMode::Json`] | anything else | envelope, `data = value` |
//! | [`ResponseMode::View`] | [`ModelView`] | forward to the view |
//! | [`ResponseMode::View`] | string | raw text |
//! | [`ResponseMode::View`] | anything else | raw text of its display form |
//!
//! Rendering cannot fail. Encoding the envelope to bytes is left to
//! `serde_json` through [`RenderInstruction::body`].
//!
//! # Example
//!
//! ```rust
//! use courier_core::Reply;
//! use courier_extract::render::{render, RenderInstruction, ResponseMode};
//!
//! let instruction = render(ResponseMode::Json, Reply::from(vec!["a", "b", "c"]));
//! let RenderInstruction::Json(envelope) = &instruction else { unreachable!() };
//! assert_eq!(envelope.status, "success");
//! assert_eq!(envelope.code, 200);
//!
//! let json = serde_json::to_value(envelope).unwrap();
//! assert_eq!(json["data"]["count"], 3);
//! ```

use bytes::Bytes;
use courier_core::{ModelView, Reply, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Content type of JSON envelopes.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Content type of raw text output.
pub const TEXT_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";

/// Status string of every envelope.
pub const SUCCESS_STATUS: &str = "success";

/// Code of every envelope.
pub const SUCCESS_CODE: u16 = 200;

/// How a route renders its handler's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    /// Forward to a view, or write raw text.
    #[default]
    View,
    /// Wrap the reply in a JSON envelope.
    Json,
}

/// The JSON success envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonEnvelope {
    /// Always `"success"`.
    pub status: String,
    /// Always `200`.
    pub code: u16,
    /// The payload.
    pub data: Value,
}

impl JsonEnvelope {
    /// Wraps `data` in a success envelope.
    ///
    /// Lists and maps become `{count, items}`.
    #[must_use]
    pub fn success(data: Value) -> Self {
        let data = match data.collection_len() {
            Some(count) => {
                let mut wrapped = IndexMap::with_capacity(2);
                wrapped.insert(
                    "count".to_string(),
                    Value::Int(i64::try_from(count).unwrap_or(i64::MAX)),
                );
                wrapped.insert("items".to_string(), data);
                Value::Map(wrapped)
            }
            None => data,
        };
        Self {
            status: SUCCESS_STATUS.to_string(),
            code: SUCCESS_CODE,
            data,
        }
    }
}

/// What the serving layer should do with a handler's reply.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    /// Render the named view with the given request attributes.
    ViewForward {
        /// View path.
        view_path: String,
        /// Attributes exposed to the view.
        attributes: IndexMap<String, Value>,
    },
    /// Write text as-is.
    RawText {
        /// The text.
        value: String,
    },
    /// Write a JSON envelope.
    Json(JsonEnvelope),
}

impl RenderInstruction {
    /// The content type to send, if the instruction writes a body.
    #[must_use]
    pub fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::ViewForward { .. } => None,
            Self::RawText { .. } => Some(TEXT_CONTENT_TYPE),
            Self::Json(_) => Some(JSON_CONTENT_TYPE),
        }
    }

    /// Encodes the body. View forwards have none.
    pub fn body(&self) -> Result<Bytes, serde_json::Error> {
        match self {
            Self::ViewForward { .. } => Ok(Bytes::new()),
            Self::RawText { value } => Ok(Bytes::from(value.clone())),
            Self::Json(envelope) => serde_json::to_vec(envelope).map(Bytes::from),
        }
    }

    /// Copies view attributes into `scope`. Other instructions carry none.
    pub fn export_attributes(&self, scope: &mut dyn AttributeScope) {
        if let Self::ViewForward { attributes, .. } = self {
            for (name, value) in attributes {
                scope.set_attribute(name, value.clone());
            }
        }
    }
}

/// A request-scoped attribute space, such as the one a template engine reads.
pub trait AttributeScope {
    /// Sets one attribute.
    fn set_attribute(&mut self, name: &str, value: Value);
}

impl AttributeScope for IndexMap<String, Value> {
    fn set_attribute(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }
}

impl AttributeScope for std::collections::HashMap<String, Value> {
    fn set_attribute(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }
}

/// Renders a reply.
#[must_use]
pub fn render(mode: ResponseMode, reply: Reply) -> RenderInstruction {
    match (mode, reply) {
        (ResponseMode::Json, Reply::View(mv)) => {
            RenderInstruction::Json(JsonEnvelope::success(model_view_value(mv)))
        }
        (ResponseMode::Json, Reply::Value(value)) => {
            RenderInstruction::Json(JsonEnvelope::success(value))
        }
        (ResponseMode::View, Reply::View(mv)) => {
            let (view_path, attributes) = mv.into_parts();
            RenderInstruction::ViewForward {
                view_path,
                attributes,
            }
        }
        (ResponseMode::View, Reply::Value(Value::Str(value))) => RenderInstruction::RawText { value },
        (ResponseMode::View, Reply::Value(other)) => RenderInstruction::RawText {
            value: other.to_string(),
        },
    }
}

/// Renders a reply and copies any view attributes into `scope`.
pub fn render_into(
    mode: ResponseMode,
    reply: Reply,
    scope: &mut dyn AttributeScope,
) -> RenderInstruction {
    let instruction = render(mode, reply);
    instruction.export_attributes(scope);
    instruction
}

fn model_view_value(mv: ModelView) -> Value {
    let (view, attributes) = mv.into_parts();
    let mut map = IndexMap::with_capacity(2);
    map.insert("view".to_string(), Value::Str(view));
    map.insert("attributes".to_string(), Value::Map(attributes));
    Value::Map(map)
}
