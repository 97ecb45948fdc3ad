//! Object schemas describing the types the mapper can rebuild.
//!
//! A schema is declared once at registration time and shared through an
//! `Arc`. It names the type, lists its fields with their shapes and may point
//! at a parent schema whose fields are inherited.

use std::sync::Arc;

use crate::scalar::ScalarType;
use crate::value::Value;

/// Shape of one field in an [`ObjectSchema`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldShape {
    /// A primitive scalar. Zero value is the type's zero.
    Primitive(ScalarType),
    /// A nullable scalar. Zero value is null.
    Wrapper(ScalarType),
    /// A string.
    Text,
    /// A list whose elements are instances of the schema.
    List(Arc<ObjectSchema>),
    /// A nested object.
    Object(Arc<ObjectSchema>),
}

impl FieldShape {
    /// The value a freshly constructed object holds in this field.
    #[must_use]
    pub fn zero(&self) -> Value {
        match self {
            Self::Primitive(scalar) => scalar.zero(),
            Self::Wrapper(_) | Self::Text | Self::List(_) | Self::Object(_) => Value::Null,
        }
    }

    /// Returns true for primitives, wrappers and strings.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Primitive(_) | Self::Wrapper(_) | Self::Text)
    }

    /// Checks a coerced value against this shape.
    ///
    /// Numeric values widen the way a primitive assignment would. Text fields
    /// are handled by the caller, which stores the raw string. Returns the
    /// value to store, or hands the rejected value back.
    pub fn admit(&self, value: Value) -> Result<Value, Value> {
        match self {
            Self::Primitive(scalar) | Self::Wrapper(scalar) => scalar.admit(value),
            Self::Text => match value {
                Value::Str(_) | Value::Null => Ok(value),
                other => Ok(Value::Str(other.to_string())),
            },
            Self::List(_) | Self::Object(_) => Err(value),
        }
    }

    /// Human readable name of the shape, used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Primitive(scalar) => scalar.name().to_string(),
            Self::Wrapper(scalar) => format!("{}?", scalar.name()),
            Self::Text => "string".to_string(),
            Self::List(schema) => format!("list<{}>", schema.name()),
            Self::Object(schema) => schema.name().to_string(),
        }
    }
}

/// A named field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    name: String,
    shape: FieldShape,
}

impl FieldSchema {
    /// Creates a field.
    pub fn new(name: impl Into<String>, shape: FieldShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field shape.
    #[must_use]
    pub fn shape(&self) -> &FieldShape {
        &self.shape
    }
}

/// Description of an object type.
///
/// # Example
///
/// ```rust
/// use courier_core::{FieldShape, ObjectSchema, ScalarType};
///
/// let dept = ObjectSchema::builder("Department")
///     .field("name", FieldShape::Text)
///     .build();
///
/// let employee = ObjectSchema::builder("Employee")
///     .field("name", FieldShape::Text)
///     .field("age", FieldShape::Primitive(ScalarType::Int))
///     .field("departement", FieldShape::List(dept))
///     .build();
///
/// assert!(employee.find_field("age").is_some());
/// assert!(employee.find_field("salary").is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    name: String,
    fields: Vec<FieldSchema>,
    parent: Option<Arc<ObjectSchema>>,
}

impl ObjectSchema {
    /// Starts a schema named `name`.
    pub fn builder(name: impl Into<String>) -> ObjectSchemaBuilder {
        ObjectSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
            parent: None,
        }
    }

    /// The type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields declared directly on this type.
    #[must_use]
    pub fn declared_fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// The parent schema, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<ObjectSchema>> {
        self.parent.as_ref()
    }

    /// Looks a field up by exact name, on this type first, then up the
    /// ancestor chain.
    #[must_use]
    pub fn find_field(&self, name: &str) -> Option<&FieldSchema> {
        let mut current = Some(self);
        while let Some(schema) = current {
            if let Some(field) = schema.fields.iter().find(|f| f.name == name) {
                return Some(field);
            }
            current = schema.parent.as_deref();
        }
        None
    }

    /// All fields, root ancestor's first, one per name.
    ///
    /// A redeclared field keeps the position of its first declaration and
    /// takes the shape of the nearest one.
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(schema) = current {
            chain.push(schema);
            current = schema.parent.as_deref();
        }

        let mut fields: Vec<&FieldSchema> = Vec::new();
        for field in chain.into_iter().rev().flat_map(|s| s.fields.iter()) {
            match fields.iter_mut().find(|f| f.name == field.name) {
                Some(slot) => *slot = field,
                None => fields.push(field),
            }
        }
        fields.into_iter()
    }
}

/// Builder for [`ObjectSchema`].
#[derive(Debug)]
#[must_use]
pub struct ObjectSchemaBuilder {
    name: String,
    fields: Vec<FieldSchema>,
    parent: Option<Arc<ObjectSchema>>,
}

impl ObjectSchemaBuilder {
    /// Adds a field.
    pub fn field(mut self, name: impl Into<String>, shape: FieldShape) -> Self {
        self.fields.push(FieldSchema::new(name, shape));
        self
    }

    /// Inherits the fields of `parent`.
    pub fn extends(mut self, parent: &Arc<ObjectSchema>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Finishes the schema.
    #[must_use]
    pub fn build(self) -> Arc<ObjectSchema> {
        Arc::new(ObjectSchema {
            name: self.name,
            fields: self.fields,
            parent: self.parent,
        })
    }
}
