//! Reconstructed object instances.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::schema::ObjectSchema;
use crate::value::Value;

/// An instance of an [`ObjectSchema`].
///
/// Every field declared on the schema or its ancestors is present from
/// construction, holding its zero value until assigned. Inherited fields come
/// first, in declaration order.
#[derive(Debug, Clone)]
pub struct Object {
    schema: Arc<ObjectSchema>,
    fields: IndexMap<String, Value>,
}

impl Object {
    /// Creates a zero-initialized instance of `schema`.
    #[must_use]
    pub fn new(schema: &Arc<ObjectSchema>) -> Self {
        let fields = schema
            .all_fields()
            .map(|field| (field.name().to_string(), field.shape().zero()))
            .collect();
        Self {
            schema: Arc::clone(schema),
            fields,
        }
    }

    /// The schema this object was built from.
    #[must_use]
    pub fn schema(&self) -> &Arc<ObjectSchema> {
        &self.schema
    }

    /// The schema's type name.
    #[must_use]
    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    /// Returns a field's current value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Assigns a field.
    ///
    /// Returns false, leaving the object untouched, when the schema has no
    /// such field.
    pub fn set(&mut self, field: &str, value: Value) -> bool {
        match self.fields.get_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Iterates over (field, value) pairs.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.fields == other.fields
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name())?;
        for (i, (k, v)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str(")")
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
