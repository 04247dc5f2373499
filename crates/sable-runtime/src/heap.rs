//! Heap object table and root-set collection
//!
//! The heap owns one strong handle per live object, keyed by a monotonically
//! increasing [`ObjectId`]. Collection drops the heap's handle for every
//! object whose id is not in the supplied root set; the object's memory is
//! released once the last user-held [`GcRef`](crate::GcRef) goes away too.
//!
//! Ids are never reused. A weak reference that latched onto an object can
//! therefore never observe a *different* object through the same token, no
//! matter how many allocations and collections happen afterwards.

use crate::value::GcRef;
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identity of a heap object
///
/// Allocated from a per-heap monotonic counter; never reused for the lifetime
/// of the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Get the raw id value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Root set for collection
///
/// Contains the ids of all objects directly reachable by the program: values
/// on task stacks and global variables. Anything not transitively rooted is
/// reclaimed; at this layer reachability is the flat root set itself, object
/// tracing lives in the collector proper.
#[derive(Debug, Default)]
pub struct RootSet {
    /// Stack roots (values on task stacks)
    stack_roots: FxHashSet<ObjectId>,

    /// Global roots (global variables)
    global_roots: FxHashSet<ObjectId>,
}

impl RootSet {
    /// Create a new empty root set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stack root
    pub fn add_stack_root<T>(&mut self, obj: &GcRef<T>) {
        self.stack_roots.insert(obj.id());
    }

    /// Add a global root
    pub fn add_global_root<T>(&mut self, obj: &GcRef<T>) {
        self.global_roots.insert(obj.id());
    }

    /// Clear all stack roots
    pub fn clear_stack_roots(&mut self) {
        self.stack_roots.clear();
    }

    /// Check whether an id is rooted
    pub fn contains(&self, id: ObjectId) -> bool {
        self.stack_roots.contains(&id) || self.global_roots.contains(&id)
    }

    /// Get total number of roots
    pub fn len(&self) -> usize {
        self.stack_roots.len() + self.global_roots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Heap object table
///
/// Thread-safe: allocation and collection may be called from any thread.
pub struct Heap<T> {
    /// Owning handles for all objects the collector still considers live
    objects: Mutex<FxHashMap<ObjectId, Arc<T>>>,

    /// Next id to hand out; monotonic, never reused
    next_id: AtomicU64,
}

impl<T> Heap<T> {
    /// Create a new empty heap
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(FxHashMap::default()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Allocate an object on the heap
    ///
    /// Returns a strong handle; the heap keeps its own strong handle until
    /// a collection finds the object unrooted.
    pub fn allocate(&self, value: T) -> GcRef<T> {
        let id = ObjectId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let value = Arc::new(value);
        self.objects.lock().insert(id, Arc::clone(&value));
        GcRef::from_parts(id, value)
    }

    /// Collect: drop ownership of every object not in the root set
    ///
    /// An object's payload is freed once no user-held handle remains either.
    /// Weak references to reclaimed objects observe the transition atomically
    /// on their next `get()`.
    pub fn collect(&self, roots: &RootSet) {
        let mut objects = self.objects.lock();
        objects.retain(|id, _| roots.contains(*id));
    }

    /// Number of objects the heap still owns
    pub fn live_objects(&self) -> usize {
        self.objects.lock().len()
    }

    /// Check whether the heap still owns an object
    pub fn owns(&self, id: ObjectId) -> bool {
        self.objects.lock().contains_key(&id)
    }
}

impl<T> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}
