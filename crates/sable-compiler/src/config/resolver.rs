//! Library path resolution
//!
//! Combines the libraries a compilation declares explicitly with the
//! distribution's implicit libraries into the final ordered load list.
//! Resolution is pure: it never touches the filesystem, and malformed or
//! missing paths are the loader's problem.

use std::path::PathBuf;

/// Resolve the ordered list of libraries to load
///
/// Explicit libraries come first, in declaration order, followed by the
/// implicit libraries. With `no_stdlib` set, the implicit list is skipped
/// entirely and the explicit list is returned unchanged.
pub fn resolve_libraries(
    explicit: &[PathBuf],
    no_stdlib: bool,
    implicit: &[PathBuf],
) -> Vec<PathBuf> {
    if no_stdlib {
        return explicit.to_vec();
    }
    explicit.iter().chain(implicit.iter()).cloned().collect()
}
