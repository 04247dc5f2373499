//! Module descriptors and the module arena
//!
//! One [`ModuleDescriptor`] exists per loaded library. Descriptors live in a
//! [`ModuleSet`] arena owned by the configuration, and refer to each other by
//! [`ModuleId`] index rather than by owning pointer, so the all-to-all
//! dependency wiring cannot form ownership cycles.

use crate::metadata::LibraryMetadata;
use std::path::{Path, PathBuf};

/// Index of a module within its [`ModuleSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleId(usize);

impl ModuleId {
    /// Get the raw arena index
    pub fn index(&self) -> usize {
        self.0
    }
}

/// In-memory representation of one loaded library
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDescriptor {
    /// Path the library was loaded from
    path: PathBuf,

    /// Deserialized metadata payload
    metadata: LibraryMetadata,

    /// Dependencies, as arena indices; populated in bulk by the linker and
    /// immutable for the rest of the session
    dependencies: Vec<ModuleId>,
}

impl ModuleDescriptor {
    pub(crate) fn new(path: PathBuf, metadata: LibraryMetadata) -> Self {
        Self {
            path,
            metadata,
            dependencies: Vec::new(),
        }
    }

    /// Module name, from the library metadata
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Path the library was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The library's metadata payload
    pub fn metadata(&self) -> &LibraryMetadata {
        &self.metadata
    }

    /// Dependencies as arena indices
    pub fn dependencies(&self) -> &[ModuleId] {
        &self.dependencies
    }

    pub(crate) fn set_dependencies(&mut self, dependencies: Vec<ModuleId>) {
        self.dependencies = dependencies;
    }
}

/// Arena of loaded module descriptors
///
/// Owns every descriptor of the compilation session; iteration order is the
/// load order, which is the resolved library order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleSet {
    modules: Vec<ModuleDescriptor>,
}

impl ModuleSet {
    pub(crate) fn from_modules(modules: Vec<ModuleDescriptor>) -> Self {
        Self { modules }
    }

    /// Number of modules in the set
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Look up a module by id
    pub fn get(&self, id: ModuleId) -> Option<&ModuleDescriptor> {
        self.modules.get(id.0)
    }

    /// All module ids, in load order
    pub fn ids(&self) -> impl Iterator<Item = ModuleId> + '_ {
        (0..self.modules.len()).map(ModuleId)
    }

    /// All modules, in load order
    pub fn iter(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ModuleDescriptor> {
        self.modules.iter_mut()
    }
}
