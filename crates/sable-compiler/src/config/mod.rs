//! Compiler configuration
//!
//! Session-scoped state for one compilation invocation: which libraries to
//! load, where the distribution lives, and the lazily computed linked module
//! set the rest of the pipeline consumes.
//!
//! The module set is built on first access and memoized; a second read
//! returns the same set without re-running the loader or linker.

pub mod distribution;
pub mod linker;
pub mod loader;
pub mod modules;
pub mod resolver;

use crate::metadata::MetadataError;
use crate::profiler::PhaseProfiler;
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use thiserror::Error;

pub use distribution::Distribution;
pub use modules::{ModuleDescriptor, ModuleId, ModuleSet};

/// Errors from configuration and library loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A declared library path does not exist on disk
    #[error("Library not found: {}", .0.display())]
    LibraryNotFound(PathBuf),

    /// A library file exists but its metadata could not be read
    #[error("Failed to load library {}: {source}", .path.display())]
    Metadata {
        /// Path of the offending library
        path: PathBuf,
        /// Underlying metadata error
        source: MetadataError,
    },
}

/// Options for one compilation invocation
///
/// Produced by the driver from command-line arguments; plain data here.
#[derive(Debug, Clone, Default)]
pub struct CompilerOptions {
    /// Name of the module being compiled
    pub module_name: String,

    /// Explicitly declared libraries, in declaration order
    pub libraries: Vec<PathBuf>,

    /// Native libraries to pass through to the platform linker
    pub native_libraries: Vec<PathBuf>,

    /// Skip the distribution's implicit libraries
    pub no_stdlib: bool,

    /// This invocation compiles the standard library itself
    pub compile_as_stdlib: bool,
}

/// Configuration of one compilation session
pub struct CompilerConfig {
    options: CompilerOptions,
    distribution: Distribution,
    profiler: PhaseProfiler,

    /// Linked module set; computed at most once, on first access
    module_set: OnceCell<ModuleSet>,
}

impl CompilerConfig {
    /// Create a configuration for one compilation invocation
    pub fn new(options: CompilerOptions, distribution: Distribution) -> Self {
        Self {
            options,
            distribution,
            profiler: PhaseProfiler::new(),
            module_set: OnceCell::new(),
        }
    }

    /// Name of the module being compiled
    pub fn module_name(&self) -> &str {
        &self.options.module_name
    }

    /// Whether this invocation compiles the standard library itself
    pub fn compile_as_stdlib(&self) -> bool {
        self.options.compile_as_stdlib
    }

    /// The distribution this session compiles against
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// The session's phase profiler
    pub fn profiler(&self) -> &PhaseProfiler {
        &self.profiler
    }

    /// Resolved library load list: explicit first, then implicit
    ///
    /// Compiling the stdlib itself suppresses the implicit list, since the
    /// stdlib cannot depend on an already-built copy of itself.
    pub fn libraries(&self) -> Vec<PathBuf> {
        let suppress_implicit = self.options.no_stdlib || self.options.compile_as_stdlib;
        resolver::resolve_libraries(
            &self.options.libraries,
            suppress_implicit,
            &self.distribution.implicit_libraries(),
        )
    }

    /// Everything handed to the platform linker: resolved libraries plus
    /// declared native libraries, unvalidated at this layer
    pub fn libraries_to_link(&self) -> Vec<PathBuf> {
        let mut all = self.libraries();
        all.extend(self.options.native_libraries.iter().cloned());
        all
    }

    /// The linked module set for this session
    ///
    /// Loads and links on first access; memoized thereafter. Concurrent
    /// first reads are serialized by the cell, so the load/link pass
    /// publishes at most one result. A load failure is fatal to the session
    /// and nothing is cached.
    pub fn module_set(&self) -> Result<&ModuleSet, ConfigError> {
        self.module_set.get_or_try_init(|| {
            let modules = loader::load_libraries(&self.libraries(), &self.profiler)?;
            let mut set = ModuleSet::from_modules(modules);
            linker::link(&mut set);
            Ok(set)
        })
    }
}
