//! Library metadata loading
//!
//! Turns the resolved library path list into module descriptors, in input
//! order. Loading is all-or-nothing: the first missing or unreadable library
//! aborts the whole pass, and no partial descriptor list escapes.

use super::modules::ModuleDescriptor;
use super::ConfigError;
use crate::metadata;
use crate::profiler::PhaseProfiler;
use std::path::PathBuf;

/// Load metadata for every library path, in order
///
/// Fails fast: the first path that does not exist aborts the pass with
/// [`ConfigError::LibraryNotFound`] naming that path; later paths are not
/// attempted. Each successful load emits one profiler sample; sampling never
/// changes the returned descriptors.
pub fn load_libraries(
    paths: &[PathBuf],
    profiler: &PhaseProfiler,
) -> Result<Vec<ModuleDescriptor>, ConfigError> {
    let mut modules = Vec::with_capacity(paths.len());

    for path in paths {
        if !path.exists() {
            return Err(ConfigError::LibraryNotFound(path.clone()));
        }

        let loaded = profiler.profile(format!("Loading {}", path.display()), || {
            metadata::read_library(path)
        });
        let metadata = loaded.map_err(|source| ConfigError::Metadata {
            path: path.clone(),
            source,
        })?;

        modules.push(ModuleDescriptor::new(path.clone(), metadata));
    }

    Ok(modules)
}
