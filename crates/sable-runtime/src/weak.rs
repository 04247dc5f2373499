//! Weak reference cells
//!
//! A [`WeakRef`] lets user code observe a heap object without keeping it
//! alive. The cell is a two-state machine, `Present -> Absent`, driven by an
//! atomic latch:
//! - explicit [`WeakRef::clear`] flips it synchronously;
//! - collection is observed on the next [`WeakRef::get`], which latches the
//!   cell once the liveness token no longer upgrades.
//!
//! `Absent` is terminal. The cell shares its liveness token with every other
//! weak reference to the same object, and the token can only ever resolve to
//! the one object it was created for, so a cell never reports present for a
//! different object after its referent is gone.

use crate::value::{GcRef, Value};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Weak;
use thiserror::Error;

/// Errors from weak reference construction
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum WeakRefError {
    /// The supplied referent was null
    #[error("Cannot create a weak reference to null")]
    NullReferent,
}

/// Cell state: referent observable
const STATE_PRESENT: u8 = 0;
/// Cell state: cleared or collected; terminal
const STATE_ABSENT: u8 = 1;

/// Non-owning observation cell for a heap object
///
/// Many cells may observe one object; none of them extend its lifetime.
/// All operations are lock-free and never panic.
#[derive(Debug)]
pub struct WeakRef<T> {
    /// Liveness token shared with the object's owning handles
    token: Weak<T>,

    /// Identity of the referent this cell was created for
    referent_id: crate::heap::ObjectId,

    /// Present/Absent latch; one-way transition
    state: AtomicU8,
}

impl<T> WeakRef<T> {
    /// Create a weak reference observing the given value
    ///
    /// Fails with [`WeakRefError::NullReferent`] if the value is null; a cell
    /// never exists in the `Present` state without a referent.
    pub fn new(referent: &Value<T>) -> Result<Self, WeakRefError> {
        let obj = referent.as_object().ok_or(WeakRefError::NullReferent)?;
        Ok(Self {
            token: obj.liveness_token(),
            referent_id: obj.id(),
            state: AtomicU8::new(STATE_PRESENT),
        })
    }

    /// Get a strong handle to the referent, or `None` if it is gone
    ///
    /// Returns `None` permanently once the cell was cleared or the referent
    /// was reclaimed. A successful return is a real strong handle: the
    /// referent cannot be reclaimed while the caller holds it.
    pub fn get(&self) -> Option<GcRef<T>> {
        if self.state.load(Ordering::Acquire) == STATE_ABSENT {
            return None;
        }
        match self.token.upgrade() {
            Some(value) => Some(GcRef::from_parts(self.referent_id, value)),
            None => {
                // Referent reclaimed between construction and this call.
                // Latch the cell; losing the race to clear() is fine since
                // both writers store the same terminal state.
                self.latch_absent();
                None
            }
        }
    }

    /// Clear the cell, forcing it to report absent from now on
    ///
    /// Idempotent; clearing an already-absent cell is a no-op. Racing with a
    /// concurrent collection is safe: both paths converge on `Absent`.
    pub fn clear(&self) {
        self.latch_absent();
    }

    /// Check whether the cell currently reports absent
    ///
    /// Unlike [`get`](Self::get), this does not consult the liveness token,
    /// so it may still say `false` for a collected-but-not-yet-observed
    /// referent.
    pub fn is_absent(&self) -> bool {
        self.state.load(Ordering::Acquire) == STATE_ABSENT
    }

    /// Identity of the referent this cell was created for
    ///
    /// Stable across the cell's whole lifetime, including after clearing.
    pub fn referent_id(&self) -> crate::heap::ObjectId {
        self.referent_id
    }

    fn latch_absent(&self) {
        let _ = self.state.compare_exchange(
            STATE_PRESENT,
            STATE_ABSENT,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::{Heap, RootSet};

    #[test]
    fn test_new_rejects_null() {
        let result = WeakRef::<i32>::new(&Value::Null);
        assert_eq!(result.unwrap_err(), WeakRefError::NullReferent);
    }

    #[test]
    fn test_get_returns_referent_while_live() {
        let heap = Heap::new();
        let obj = heap.allocate("alive".to_string());

        let weak = WeakRef::new(&Value::Object(obj.clone())).unwrap();
        let got = weak.get().expect("referent should be present");
        assert_eq!(got.id(), obj.id());
        assert_eq!(*got, "alive");
    }

    #[test]
    fn test_clear_is_terminal_and_idempotent() {
        let heap = Heap::new();
        let obj = heap.allocate(7);

        let weak = WeakRef::new(&Value::Object(obj.clone())).unwrap();
        weak.clear();
        assert!(weak.get().is_none());

        // Second clear is a no-op; the referent itself is still alive.
        weak.clear();
        assert!(weak.get().is_none());
        assert_eq!(*obj, 7);
    }

    #[test]
    fn test_collection_observed_as_absent() {
        let heap = Heap::new();
        let obj = heap.allocate(vec![1u8, 2, 3]);
        let weak = WeakRef::new(&Value::Object(obj.clone())).unwrap();

        drop(obj);
        heap.collect(&RootSet::new());

        assert!(weak.get().is_none());
        assert!(weak.is_absent());
    }

    #[test]
    fn test_user_handle_keeps_referent_present() {
        let heap = Heap::new();
        let obj = heap.allocate("rooted in user code".to_string());
        let weak = WeakRef::new(&Value::Object(obj.clone())).unwrap();

        // The heap drops its handle, but `obj` is still a strong path.
        heap.collect(&RootSet::new());
        assert!(weak.get().is_some());

        drop(obj);
        assert!(weak.get().is_none());
    }

    #[test]
    fn test_get_handle_pins_referent() {
        let heap = Heap::new();
        let obj = heap.allocate(99);
        let weak = WeakRef::new(&Value::Object(obj.clone())).unwrap();

        let pinned = weak.get().unwrap();
        drop(obj);
        heap.collect(&RootSet::new());

        // The handle returned by get() is itself a strong path.
        assert_eq!(*pinned, 99);

        drop(pinned);
        assert!(weak.get().is_none());
    }

    #[test]
    fn test_many_cells_one_referent() {
        let heap = Heap::new();
        let obj = heap.allocate("shared".to_string());
        let value = Value::Object(obj.clone());

        let cells: Vec<_> = (0..4).map(|_| WeakRef::new(&value).unwrap()).collect();
        for cell in &cells {
            assert_eq!(cell.get().unwrap().id(), obj.id());
        }

        // Clearing one cell does not affect the others.
        cells[0].clear();
        assert!(cells[0].get().is_none());
        assert!(cells[1].get().is_some());
    }

    #[test]
    fn test_no_resurrection_after_collection() {
        let heap = Heap::new();
        let obj = heap.allocate(1);
        let weak = WeakRef::new(&Value::Object(obj.clone())).unwrap();
        let old_id = obj.id();

        drop(obj);
        heap.collect(&RootSet::new());
        assert!(weak.get().is_none());

        // New allocations never show up through the old cell.
        let fresh = heap.allocate(2);
        assert_ne!(fresh.id(), old_id);
        assert!(weak.get().is_none());
    }
}
