//! High-level API for PSIS with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for PSIS with
//! parallel execution capabilities. It extends the `psis` API with adapters
//! whose tail pass utilizes all available CPU cores.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `psis` builder pattern.
//! * **Parallel-First**: Defaults to parallel execution where beneficial.
//! * **Transparent**: Marker types (Array, Matrix, Vector) select the parallel builders.
//!
//! ## Key concepts
//!
//! * **Parallel Support**: Uses `rayon` for the per-data-point tail pass.
//! * **Extended Adapters**: Wraps core adapters with pass-injection logic.
//! * **Feature-Gated**: Parallelism is configurable via the `cpu` feature.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`PsisBuilder`] via `Psis::new()`.
//! 2. Chain configuration methods (`.r_eff()`, `.source()`, etc.).
//! 3. Select an adapter via `.adapter(Array)` to get a parallel execution builder.

// Internal dependencies
use crate::adapters::array::ParallelArrayPsisBuilder;
use crate::adapters::matrix::ParallelMatrixPsisBuilder;

// External dependencies
use num_traits::Float;

// Import base marker types for delegation
use psis::internals::api::Array as BaseArray;
use psis::internals::api::Matrix as BaseMatrix;
use psis::internals::api::Vector as BaseVector;

// Publicly re-exported types
pub use psis::internals::adapters::vector::{SmoothedVector, VectorPsisBuilder};
pub use psis::internals::api::{PsisAdapter, PsisBuilder};
pub use psis::internals::engine::executor::SampleSource;
pub use psis::internals::engine::output::{PsisLooResult, PsisResult};
pub use psis::internals::evaluation::cv::{CvMethod, LooPointwise, LooSummary, SummaryRow};
pub use psis::internals::evaluation::diagnostics::{DiagnosticCounts, ShapeStatus};
pub use psis::internals::primitives::errors::{PsisError, TailReason};

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Array, Matrix, Vector};
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for the parallel 3-D array form.
#[derive(Debug, Clone, Copy)]
pub struct Array;

impl<T: Float> PsisAdapter<T> for Array {
    type Output = ParallelArrayPsisBuilder<T>;

    fn convert(builder: PsisBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true for fastPsis
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let base = <BaseArray as PsisAdapter<T>>::convert(builder).parallel(parallel);

        // Wrap with extension fields
        ParallelArrayPsisBuilder { base }
    }
}

/// Marker for the parallel 2-D matrix + chain-index form.
#[derive(Debug, Clone, Copy)]
pub struct Matrix;

impl<T: Float> PsisAdapter<T> for Matrix {
    type Output = ParallelMatrixPsisBuilder<T>;

    fn convert(builder: PsisBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true for fastPsis
        let parallel = builder.parallel.unwrap_or(true);

        // The matrix form shares the array configuration surface
        let base = <BaseMatrix as PsisAdapter<T>>::convert(builder)
            .inner
            .parallel(parallel);

        ParallelMatrixPsisBuilder { base }
    }
}

/// Marker for the single-vector form.
///
/// A single data point has no cross-point parallelism to exploit, so this
/// delegates to the sequential `psis` adapter unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Vector;

impl<T: Float> PsisAdapter<T> for Vector {
    type Output = VectorPsisBuilder<T>;

    fn convert(builder: PsisBuilder<T>) -> Self::Output {
        <BaseVector as PsisAdapter<T>>::convert(builder)
    }
}
