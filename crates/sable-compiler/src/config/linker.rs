//! Module dependency linking
//!
//! Populates each loaded module's dependency list. The wiring is
//! deliberately flat: every module depends on every loaded module, itself
//! included. Selective and transitive resolution are out of scope at this
//! layer; downstream phases prune what they actually use.

use super::modules::ModuleSet;

/// Wire every module's dependencies to the full loaded set
///
/// Idempotent: linking an already-linked set is a no-op.
pub fn link(set: &mut ModuleSet) {
    let all: Vec<_> = set.ids().collect();
    for module in set.iter_mut() {
        // Yes, all of them.
        module.set_dependencies(all.clone());
    }
}
