//! Sable Managed Runtime
//!
//! This crate provides the runtime facilities that compiled Sable programs
//! link against:
//! - **Heap**: object table with root-set collection (`heap` module)
//! - **Values**: nullable object handles (`value` module)
//! - **Weak references**: non-owning observation cells (`weak` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use sable_runtime::{Heap, Value, WeakRef};
//!
//! let heap = Heap::new();
//! let obj = heap.allocate("payload".to_string());
//!
//! let weak = WeakRef::new(&Value::Object(obj.clone())).unwrap();
//! assert!(weak.get().is_some());
//!
//! // Collect with an empty root set: the object is reclaimed.
//! drop(obj);
//! heap.collect(&Default::default());
//! assert!(weak.get().is_none());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Heap module: object table, root set, collection
pub mod heap;

/// Value module: nullable object handles
pub mod value;

/// Weak reference module: non-owning observation cells
pub mod weak;

pub use heap::{Heap, ObjectId, RootSet};
pub use value::{GcRef, Value};
pub use weak::{WeakRef, WeakRefError};
