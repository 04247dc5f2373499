//! Compilation phase profiler
//!
//! Zero-cost when disabled (single `AtomicBool` check per phase). When
//! enabled, records one wall-clock sample per labeled phase; the loader uses
//! it to report per-library load times. Recording never changes the result
//! of the profiled closure.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// A single recorded phase timing
#[derive(Debug, Clone)]
pub struct PhaseSample {
    /// Phase label, e.g. `"Loading /path/to/stdlib.sblib"`
    pub label: String,
    /// Wall-clock duration of the phase
    pub duration: Duration,
}

/// Phase profiler
///
/// Disabled by default; a disabled profiler records nothing.
#[derive(Debug, Default)]
pub struct PhaseProfiler {
    /// Hot-path gate; checked before any timing work
    enabled: AtomicBool,

    /// Recorded samples, in phase completion order
    samples: Mutex<Vec<PhaseSample>>,
}

impl PhaseProfiler {
    /// Create a disabled profiler
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an enabled profiler
    pub fn enabled() -> Self {
        let profiler = Self::new();
        profiler.set_enabled(true);
        profiler
    }

    /// Enable or disable sample recording
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    /// Check whether recording is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Run a closure as a named phase, recording its duration if enabled
    ///
    /// The closure's return value passes through untouched either way.
    pub fn profile<T>(&self, label: impl Into<String>, f: impl FnOnce() -> T) -> T {
        if !self.is_enabled() {
            return f();
        }

        let start = Instant::now();
        let result = f();
        self.samples.lock().push(PhaseSample {
            label: label.into(),
            duration: start.elapsed(),
        });
        result
    }

    /// Take all recorded samples, leaving the profiler empty
    pub fn take_samples(&self) -> Vec<PhaseSample> {
        std::mem::take(&mut *self.samples.lock())
    }

    /// Number of samples currently recorded
    pub fn sample_count(&self) -> usize {
        self.samples.lock().len()
    }
}
