//! Handler return values.

use indexmap::IndexMap;
use serde::Serialize;

use crate::value::Value;

/// A view name plus the attributes to expose to it.
///
/// # Example
///
/// ```rust
/// use courier_core::{ModelView, Value};
///
/// let mv = ModelView::new("users/list.jsp")
///     .with("count", 2)
///     .with("title", "Users");
///
/// assert_eq!(mv.view(), "users/list.jsp");
/// assert_eq!(mv.attribute("count"), Some(&Value::Int(2)));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ModelView {
    view: String,
    attributes: IndexMap<String, Value>,
}

impl ModelView {
    /// Creates a view with no attributes.
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_attribute(name, value);
        self
    }

    /// Adds or replaces an attribute.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Replaces the view path.
    pub fn set_view(&mut self, view: impl Into<String>) {
        self.view = view.into();
    }

    /// The view path.
    #[must_use]
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Returns one attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// All attributes in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    /// Splits into view path and attributes.
    #[must_use]
    pub fn into_parts(self) -> (String, IndexMap<String, Value>) {
        (self.view, self.attributes)
    }
}

/// What a handler hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Forward to a view.
    View(ModelView),
    /// Any other value.
    Value(Value),
}

impl Reply {
    /// A reply carrying no value.
    #[must_use]
    pub fn empty() -> Self {
        Self::Value(Value::Null)
    }
}

impl From<ModelView> for Reply {
    fn from(mv: ModelView) -> Self {
        Self::View(mv)
    }
}

impl From<Value> for Reply {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

macro_rules! reply_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Reply {
                fn from(value: $ty) -> Self {
                    Self::Value(Value::from(value))
                }
            }
        )*
    };
}

reply_from!(bool, i32, i64, f64, String, &str, crate::object::Object);

impl<T: Into<Value>> From<Vec<T>> for Reply {
    fn from(items: Vec<T>) -> Self {
        Self::Value(Value::from(items))
    }
}

impl<T: Into<Value>> From<IndexMap<String, T>> for Reply {
    fn from(map: IndexMap<String, T>) -> Self {
        Self::Value(Value::from(map))
    }
}
