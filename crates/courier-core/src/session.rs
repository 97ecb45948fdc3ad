//! Session handles.
//!
//! Storage lives outside the dispatcher; handlers only see a [`Session`]
//! handle delegating to whatever [`SessionStore`] the serving layer supplies.
//! [`MemorySession`] is a small in-process store for embedding and tests.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::value::Value;

/// Backing store for one client's session attributes.
///
/// Implementations own their synchronization.
pub trait SessionStore: Send + Sync {
    /// Returns the attribute stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: Value);

    /// Removes and returns the attribute stored under `key`.
    fn remove(&self, key: &str) -> Option<Value>;

    /// Discards every attribute and ends the session.
    fn invalidate(&self);
}

/// A cloneable handle to a session.
///
/// # Example
///
/// ```rust
/// use courier_core::{MemorySession, Session, Value};
///
/// let session = Session::new(MemorySession::new());
/// session.put("user", Value::from("ada"));
/// assert_eq!(session.get("user"), Some(Value::from("ada")));
///
/// session.invalidate();
/// assert_eq!(session.get("user"), None);
/// ```
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    /// Wraps a store.
    pub fn new(store: impl SessionStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wraps a shared store.
    pub fn from_arc(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Returns the attribute stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.store.get(key)
    }

    /// Stores an attribute.
    pub fn put(&self, key: &str, value: impl Into<Value>) {
        self.store.put(key, value.into());
    }

    /// Removes an attribute.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.store.remove(key)
    }

    /// Ends the session.
    pub fn invalidate(&self) {
        self.store.invalidate();
    }

    /// Returns true if both handles point at the same store.
    #[must_use]
    pub fn same_store(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.same_store(other)
    }
}

/// In-memory [`SessionStore`].
#[derive(Debug, Default)]
pub struct MemorySession {
    attributes: RwLock<IndexMap<String, Value>>,
}

impl MemorySession {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.read().is_empty()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<Value> {
        self.attributes.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: Value) {
        self.attributes.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) -> Option<Value> {
        self.attributes.write().shift_remove(key)
    }

    fn invalidate(&self) {
        self.attributes.write().clear();
    }
}
