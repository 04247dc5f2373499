//! Toolchain distribution layout
//!
//! Maps a distribution root directory to the well-known paths inside it.
//! The configuration only needs the implicit library list from here; the
//! rest of the toolchain (runtime archives, target sysroots) hangs off the
//! same root in the full compiler.

use std::path::{Path, PathBuf};

/// Standard library file name inside the distribution
const STDLIB_FILE: &str = "stdlib.sblib";

/// Layout of an installed Sable distribution
#[derive(Debug, Clone)]
pub struct Distribution {
    /// Distribution root directory
    root: PathBuf,
}

impl Distribution {
    /// Create a distribution rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the distribution root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the bundled libraries
    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }

    /// Path of the bundled standard library
    pub fn stdlib(&self) -> PathBuf {
        self.lib_dir().join(STDLIB_FILE)
    }

    /// Libraries every compilation links implicitly, in link order
    pub fn implicit_libraries(&self) -> Vec<PathBuf> {
        vec![self.stdlib()]
    }
}
