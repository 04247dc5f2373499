//! Object value handles
//!
//! User-visible handles to heap objects. A [`Value`] is what compiled code
//! passes around: either `Null` or a strong handle to a heap object. A
//! [`GcRef`] is the strong handle itself; holding one keeps the object
//! reachable regardless of what the heap's object table does.

use crate::heap::ObjectId;
use std::ops::Deref;
use std::sync::{Arc, Weak};

/// Strong handle to a heap-allocated object
///
/// Cloning a `GcRef` is cheap and does not duplicate the object. The object
/// stays alive at least as long as any `GcRef` to it exists, even if the heap
/// has already dropped it from its object table.
#[derive(Debug)]
pub struct GcRef<T> {
    /// Identity of the object; unique for the lifetime of the heap
    id: ObjectId,
    /// Owning reference to the object payload
    value: Arc<T>,
}

impl<T> GcRef<T> {
    pub(crate) fn from_parts(id: ObjectId, value: Arc<T>) -> Self {
        Self { id, value }
    }

    /// Get the object's identity
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Downgrade to a non-owning liveness token
    ///
    /// The token upgrades back to the object only while some strong handle
    /// (the heap's, or a user-held `GcRef`) still exists.
    pub(crate) fn liveness_token(&self) -> Weak<T> {
        Arc::downgrade(&self.value)
    }
}

impl<T> Clone for GcRef<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            value: Arc::clone(&self.value),
        }
    }
}

impl<T> Deref for GcRef<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> PartialEq for GcRef<T> {
    /// Identity equality: two handles are equal iff they name the same object
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for GcRef<T> {}

/// A nullable object value
///
/// The null case is a first-class value, not an error; operations that
/// require an object (weak-reference construction, field access) reject it
/// explicitly at their own boundary.
#[derive(Debug, Clone)]
pub enum Value<T> {
    /// The null value
    Null,
    /// A strong handle to a heap object
    Object(GcRef<T>),
}

impl<T> Value<T> {
    /// Check whether this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the object handle, if this value is not null
    pub fn as_object(&self) -> Option<&GcRef<T>> {
        match self {
            Value::Null => None,
            Value::Object(obj) => Some(obj),
        }
    }
}

impl<T> From<GcRef<T>> for Value<T> {
    fn from(obj: GcRef<T>) -> Self {
        Value::Object(obj)
    }
}
