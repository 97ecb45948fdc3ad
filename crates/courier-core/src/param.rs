//! Handler parameter declarations.
//!
//! Each handler declares its parameters once, at registration. The binder
//! picks a value source from the [`ParamKind`] alone; nothing is inspected
//! at request time.

use std::sync::Arc;

use crate::scalar::ScalarType;
use crate::schema::ObjectSchema;
use crate::value::Value;

/// The closed set of parameter shapes the binder understands.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    /// A primitive scalar; absent values bind to the type's zero.
    Primitive(ScalarType),
    /// A nullable scalar; absent values bind to null.
    Wrapper(ScalarType),
    /// A string.
    Text,
    /// The caller's session handle.
    Session,
    /// Field name to the single uploaded payload for that field.
    FileMap,
    /// Field name to every uploaded payload for that field.
    MultiFileMap,
    /// Every query/form field to its coerced values.
    ValueMap,
    /// An object rebuilt from prefixed keys.
    Object(Arc<ObjectSchema>),
}

impl ParamKind {
    /// The value bound when nothing usable is found.
    #[must_use]
    pub fn absent(&self) -> Value {
        match self {
            Self::Primitive(scalar) => scalar.zero(),
            _ => Value::Null,
        }
    }

    /// Type name used in diagnostics.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Primitive(scalar) => scalar.name().to_string(),
            Self::Wrapper(scalar) => format!("{}?", scalar.name()),
            Self::Text => "string".to_string(),
            Self::Session => "session".to_string(),
            Self::FileMap => "map<string, bytes>".to_string(),
            Self::MultiFileMap => "map<string, list<bytes>>".to_string(),
            Self::ValueMap => "map<string, list<value>>".to_string(),
            Self::Object(schema) => schema.name().to_string(),
        }
    }
}

/// One declared handler parameter.
///
/// # Example
///
/// ```rust
/// use courier_core::{ParamKind, ParamSpec, ScalarType};
///
/// let id = ParamSpec::new("id", ParamKind::Primitive(ScalarType::Int));
/// assert_eq!(id.lookup_name(), "id");
///
/// let q = ParamSpec::text("query").bind_as("q");
/// assert_eq!(q.lookup_name(), "q");
/// assert!(q.has_explicit_binding());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    name: String,
    kind: ParamKind,
    binding: Option<String>,
}

impl ParamSpec {
    /// Declares a parameter.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            binding: None,
        }
    }

    /// Declares a string parameter.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Text)
    }

    /// Declares a primitive scalar parameter.
    pub fn primitive(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self::new(name, ParamKind::Primitive(scalar))
    }

    /// Declares a nullable scalar parameter.
    pub fn wrapper(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self::new(name, ParamKind::Wrapper(scalar))
    }

    /// Declares a session parameter.
    pub fn session(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Session)
    }

    /// Declares an object parameter.
    pub fn object(name: impl Into<String>, schema: &Arc<ObjectSchema>) -> Self {
        Self::new(name, ParamKind::Object(Arc::clone(schema)))
    }

    /// Binds the parameter under an explicit request name.
    #[must_use]
    pub fn bind_as(mut self, binding: impl Into<String>) -> Self {
        self.binding = Some(binding.into());
        self
    }

    /// The declared parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter shape.
    #[must_use]
    pub fn kind(&self) -> &ParamKind {
        &self.kind
    }

    /// The explicit request name, if one was given.
    #[must_use]
    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }

    /// Returns true if the parameter carries an explicit request name.
    #[must_use]
    pub fn has_explicit_binding(&self) -> bool {
        self.binding.is_some()
    }

    /// The name looked up in request data: the explicit binding, else the
    /// declared name.
    #[must_use]
    pub fn lookup_name(&self) -> &str {
        self.binding.as_deref().unwrap_or(&self.name)
    }
}
