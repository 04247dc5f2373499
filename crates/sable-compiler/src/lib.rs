//! Sable Compiler
//!
//! Compilation-setup layer of the Sable native compiler:
//! - **Configuration**: library resolution, metadata loading, and module
//!   linking for one compilation session (`config` module)
//! - **Metadata**: the `.sblib` library metadata format (`metadata` module)
//! - **Profiler**: phase timing observations (`profiler` module)
//!
//! # Example
//!
//! ```rust,ignore
//! use sable_compiler::config::{CompilerConfig, CompilerOptions, Distribution};
//!
//! let config = CompilerConfig::new(
//!     CompilerOptions {
//!         module_name: "app".to_string(),
//!         libraries: vec!["deps/http.sblib".into()],
//!         ..Default::default()
//!     },
//!     Distribution::new("/opt/sable".into()),
//! );
//!
//! let modules = config.module_set()?;
//! for module in modules.iter() {
//!     println!("{} ({} deps)", module.name(), module.dependencies().len());
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Configuration module: resolver, loader, linker, session aggregate
pub mod config;

/// Metadata module: the `.sblib` library format
pub mod metadata;

/// Profiler module: phase timing observations
pub mod profiler;

pub use config::{CompilerConfig, CompilerOptions, ConfigError, Distribution, ModuleSet};
pub use metadata::{LibraryMetadata, MetadataError};
pub use profiler::PhaseProfiler;
