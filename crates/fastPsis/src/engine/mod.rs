//! Layer 5: Engine
//!
//! This layer provides the parallel execution engine for PSIS smoothing.
//! It distributes the per-data-point tail work across CPU cores.

// Parallel execution engine using CPU threads
pub mod executor;
