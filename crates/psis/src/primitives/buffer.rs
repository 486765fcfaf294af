//! Scratch buffers for per-data-point tail smoothing.
//!
//! ## Purpose
//!
//! This module provides the task-local workspace used while smoothing one
//! data point's importance ratios. Allocating the workspace once and reusing
//! it across the per-point loop keeps the hot path allocation-free and gives
//! concurrent tasks disjoint scratch space.
//!
//! ## Design notes
//!
//! * **Task-local**: One buffer per worker; buffers are never shared between
//!   concurrently executing data points.
//! * **Lazy expansion**: Vectors grow on demand and are never shrunk,
//!   stabilizing at the largest row processed.
//! * **Not part of the result**: Nothing in here survives the computation.
//!
//! ## Key concepts
//!
//! * **Pair buffer**: (value, original index) pairs for tail selection.
//! * **Tail buffer**: shifted tail values handed to the GPD fitter.
//!
//! ## Invariants
//!
//! * Buffers are logically cleared between rows, not deallocated.
//!
//! ## Non-goals
//!
//! * Thread-local automatic caching (buffers are explicitly passed so the
//!   parallel pass can hold one per task).

// ============================================================================
// TailBuffer - Per-Task Workspace
// ============================================================================

/// Reusable workspace for smoothing a single data point's ratio vector.
#[derive(Debug, Clone)]
pub struct TailBuffer<T> {
    /// (value, original index) pairs for partial selection.
    pub pairs: Vec<(T, usize)>,

    /// Tail values shifted to start at zero, sorted ascending.
    pub tail: Vec<T>,
}

impl<T> Default for TailBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TailBuffer<T> {
    /// Create an empty buffer; vectors grow on first use.
    pub fn new() -> Self {
        Self {
            pairs: Vec::new(),
            tail: Vec::new(),
        }
    }

    /// Create a buffer pre-allocated for rows of `sample_size` elements.
    pub fn with_capacity(sample_size: usize) -> Self {
        Self {
            pairs: Vec::with_capacity(sample_size),
            tail: Vec::with_capacity(sample_size / 5 + 1),
        }
    }

    /// Clear both buffers (preserves capacity).
    pub fn clear(&mut self) {
        self.pairs.clear();
        self.tail.clear();
    }
}
