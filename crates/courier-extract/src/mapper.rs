//! Nested object reconstruction from flat form keys.
//!
//! Forms encode object graphs as dotted and bracketed keys:
//!
//! ```text
//! e.name=Ada
//! e.age=36
//! e.departement[0].name=R&D
//! e.departement[1].name=Eng
//! ```
//!
//! With prefix `e`, keys are grouped by the segment after `e.` (up to the next
//! `.` or `[`), each group is resolved to a field of the target schema and the
//! field is filled according to its shape. Nesting is limited: list elements
//! and nested objects only receive their own scalar fields.

use std::collections::BTreeSet;
use std::sync::Arc;

use courier_core::{coerce, Degradation, FieldShape, Object, ObjectSchema, Value};
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::request::ParamMap;

/// An object rebuilt by [`map_to_object`], with any fields that had to be
/// left at their zero value.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapped {
    /// The rebuilt object.
    pub object: Object,
    /// Fields whose values did not fit.
    pub degradations: Vec<Degradation>,
}

/// Rebuilds an instance of `schema` from the keys of `params` under `prefix`.
///
/// Returns `None` when no key starts with `prefix.`. Only the first value of
/// each key is used. `param` names the handler parameter in degradation
/// records.
///
/// Text fields receive the raw string as sent and are never coerced, so
/// `"007"` stays `"007"`. Other scalar fields are coerced first and left at
/// their zero value when the result does not fit.
///
/// # Example
///
/// ```rust
/// use courier_core::{FieldShape, ObjectSchema, Value};
/// use courier_extract::{map_to_object, RequestData};
///
/// let schema = ObjectSchema::builder("Employee")
///     .field("name", FieldShape::Text)
///     .build();
/// let data = RequestData::new().with_param("e.name", "Ada");
///
/// let mapped = map_to_object(data.params(), &schema, "e", "e").unwrap();
/// assert_eq!(mapped.object.get("name"), Some(&Value::from("Ada")));
///
/// assert!(map_to_object(data.params(), &schema, "x", "x").is_none());
/// ```
#[must_use]
pub fn map_to_object(
    params: &ParamMap,
    schema: &Arc<ObjectSchema>,
    prefix: &str,
    param: &str,
) -> Option<Mapped> {
    let mut mapper = ObjectMapper::new(params, param);
    let object = mapper.map(schema, prefix)?;
    Some(Mapped {
        object,
        degradations: mapper.degradations,
    })
}

struct ObjectMapper<'a> {
    params: &'a ParamMap,
    param: &'a str,
    degradations: Vec<Degradation>,
}

impl<'a> ObjectMapper<'a> {
    fn new(params: &'a ParamMap, param: &'a str) -> Self {
        Self {
            params,
            param,
            degradations: Vec::new(),
        }
    }

    fn first(&self, key: &str) -> Option<&'a str> {
        self.params
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    fn map(&mut self, schema: &Arc<ObjectSchema>, prefix: &str) -> Option<Object> {
        let dotted = format!("{prefix}.");

        // Field segment -> keys under it, in first-seen order.
        let mut groups: IndexMap<&'a str, Vec<&'a str>> = IndexMap::new();
        for key in self.params.keys() {
            let Some(rest) = key.strip_prefix(&dotted) else {
                continue;
            };
            let end = rest.find(['.', '[']).unwrap_or(rest.len());
            groups.entry(&rest[..end]).or_default().push(key.as_str());
        }

        if groups.is_empty() {
            return None;
        }

        let mut object = Object::new(schema);
        for (segment, keys) in groups {
            let Some(field) = schema.find_field(segment) else {
                trace!(
                    schema = schema.name(),
                    field = segment,
                    "Skipping key group with no matching field"
                );
                continue;
            };
            let path = format!("{prefix}.{segment}");

            match field.shape() {
                FieldShape::List(element) => {
                    let items = self.map_list(element, &path, &keys);
                    object.set(field.name(), Value::List(items));
                }
                FieldShape::Object(nested) => {
                    let value = self.map_scalars(nested, &path);
                    object.set(field.name(), Value::Object(value));
                }
                shape => {
                    if let Some(raw) = self.first(&path) {
                        if let Some(value) = self.scalar(shape, raw, &path) {
                            object.set(field.name(), value);
                        }
                    }
                }
            }
        }

        Some(object)
    }

    /// Builds one element per distinct index found in `keys`, ascending.
    fn map_list(&mut self, element: &Arc<ObjectSchema>, path: &str, keys: &[&str]) -> Vec<Value> {
        let mut indices = BTreeSet::new();
        for key in keys {
            let rest = &key[path.len()..];
            let index = rest
                .strip_prefix('[')
                .and_then(|r| r.split_once(']'))
                .and_then(|(idx, _)| idx.trim().parse::<usize>().ok());
            match index {
                Some(index) => {
                    indices.insert(index);
                }
                None => debug!(key = *key, "Ignoring list key without a numeric index"),
            }
        }

        indices
            .into_iter()
            .map(|index| {
                let item = self.map_scalars(element, &format!("{path}[{index}]"));
                Value::Object(item)
            })
            .collect()
    }

    /// Builds an instance filling only scalar fields found at `prefix.field`.
    fn map_scalars(&mut self, schema: &Arc<ObjectSchema>, prefix: &str) -> Object {
        let mut object = Object::new(schema);
        for field in schema.all_fields().filter(|f| f.shape().is_scalar()) {
            let path = format!("{prefix}.{}", field.name());
            if let Some(raw) = self.first(&path) {
                if let Some(value) = self.scalar(field.shape(), raw, &path) {
                    object.set(field.name(), value);
                }
            }
        }
        object
    }

    /// Converts a raw token for a scalar field, recording a degradation when
    /// it does not fit.
    fn scalar(&mut self, shape: &FieldShape, raw: &str, path: &str) -> Option<Value> {
        if matches!(shape, FieldShape::Text) {
            return Some(Value::Str(raw.to_string()));
        }

        match shape.admit(coerce(raw)) {
            Ok(value) => Some(value),
            Err(rejected) => {
                let reason = format!(
                    "expected {}, got {} '{raw}'",
                    shape.describe(),
                    rejected.kind()
                );
                warn!(
                    param = self.param,
                    field = path,
                    reason = %reason,
                    "Field value does not fit its type"
                );
                self.degradations
                    .push(Degradation::incompatible_field(self.param, path, reason));
                None
            }
        }
    }
}
