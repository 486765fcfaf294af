//! High-level API for Pareto-smoothed importance sampling.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for PSIS. It
//! implements a fluent builder pattern for configuring the computation and
//! choosing an input-form adapter (Array, Matrix, or Vector).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Core parameters are validated during adapter construction.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! * **Input Adapters**: Array (3-D), Matrix (2-D + chain index), Vector.
//! * **Configuration Flow**: Builder pattern ending in `.adapter(Adapter::Type)`.
//! * **Validation**: Parameters are validated when `.build()` is called on the adapter.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`PsisBuilder`] via `Psis::new()`.
//! 2. Chain configuration methods (`.r_eff()`, `.source()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Array)` to get an execution builder.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::array::ArrayPsisBuilder;
use crate::adapters::matrix::MatrixPsisBuilder;
use crate::adapters::vector::VectorPsisBuilder;
use crate::engine::executor::{RelativeEffFn, TailPassFn};

// Publicly re-exported types
pub use crate::adapters::vector::SmoothedVector;
pub use crate::engine::executor::SampleSource;
pub use crate::engine::output::{PsisLooResult, PsisResult};
pub use crate::evaluation::cv::{CvMethod, LooPointwise, LooSummary, SummaryRow};
pub use crate::evaluation::diagnostics::{DiagnosticCounts, ShapeStatus};
pub use crate::primitives::errors::{PsisError, TailReason};

/// Marker types for selecting input adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Array, Matrix, Vector};
}

/// Fluent builder for configuring PSIS parameters and input forms.
#[derive(Debug, Clone)]
pub struct PsisBuilder<T> {
    /// Per-point relative efficiencies (first entry serves the Vector form).
    pub r_eff: Option<Vec<T>>,

    /// Origin of the posterior draws.
    pub source: Option<SampleSource>,

    /// Whether to compute effective-sample-size diagnostics.
    pub calc_ess: Option<bool>,

    /// Minimum grid points for the GPD profile fit.
    pub min_grid_pts: Option<usize>,

    /// Whether the weakly-informative shape prior is applied.
    pub prior_shrinkage: Option<bool>,

    /// Cross-validation method for `estimate`.
    pub cv_method: Option<CvMethod>,

    /// Explicit tail length (Vector only).
    pub tail_length: Option<usize>,

    // ======================================
    // DEV
    // ======================================
    /// Custom tail pass function.
    #[doc(hidden)]
    pub custom_tail_pass: Option<TailPassFn<T>>,

    /// Relative-efficiency estimator for MCMC sources.
    #[doc(hidden)]
    pub relative_eff_fn: Option<RelativeEffFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for PsisBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> PsisBuilder<T> {
    /// Select an input adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: PsisAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            r_eff: None,
            source: None,
            calc_ess: None,
            min_grid_pts: None,
            prior_shrinkage: None,
            cv_method: None,
            tail_length: None,
            custom_tail_pass: None,
            relative_eff_fn: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set per-point relative efficiencies.
    pub fn r_eff(mut self, r_eff: Vec<T>) -> Self {
        if self.r_eff.is_some() {
            self.duplicate_param = Some("r_eff");
        }
        self.r_eff = Some(r_eff);
        self
    }

    /// Set the origin of the posterior draws.
    pub fn source(mut self, source: SampleSource) -> Self {
        if self.source.is_some() {
            self.duplicate_param = Some("source");
        }
        self.source = Some(source);
        self
    }

    /// Enable or disable effective-sample-size computation.
    pub fn calc_ess(mut self, enabled: bool) -> Self {
        if self.calc_ess.is_some() {
            self.duplicate_param = Some("calc_ess");
        }
        self.calc_ess = Some(enabled);
        self
    }

    /// Set the minimum grid size for the GPD profile fit.
    pub fn min_grid_pts(mut self, pts: usize) -> Self {
        if self.min_grid_pts.is_some() {
            self.duplicate_param = Some("min_grid_pts");
        }
        self.min_grid_pts = Some(pts);
        self
    }

    /// Enable or disable the weakly-informative shape prior.
    pub fn prior_shrinkage(mut self, enabled: bool) -> Self {
        if self.prior_shrinkage.is_some() {
            self.duplicate_param = Some("prior_shrinkage");
        }
        self.prior_shrinkage = Some(enabled);
        self
    }

    /// Set the cross-validation method used by `estimate`.
    pub fn cv_method(mut self, method: CvMethod) -> Self {
        if self.cv_method.is_some() {
            self.duplicate_param = Some("cv_method");
        }
        self.cv_method = Some(method);
        self
    }

    /// Pin the tail length (Vector only).
    pub fn tail_length(mut self, tail_len: usize) -> Self {
        if self.tail_length.is_some() {
            self.duplicate_param = Some("tail_length");
        }
        self.tail_length = Some(tail_len);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom tail pass function for execution (only for dev)
    #[doc(hidden)]
    pub fn custom_tail_pass(mut self, pass: TailPassFn<T>) -> Self {
        self.custom_tail_pass = Some(pass);
        self
    }

    /// Set a relative-efficiency estimator for MCMC sources (only for dev)
    #[doc(hidden)]
    pub fn relative_eff_fn(mut self, estimate: RelativeEffFn<T>) -> Self {
        self.relative_eff_fn = Some(estimate);
        self
    }

    /// Set parallel execution hint (only for dev)
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait PsisAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`PsisBuilder`] into a specialized execution builder.
    fn convert(builder: PsisBuilder<T>) -> Self::Output;
}

/// Marker for the 3-D [data, draw, chain] array form.
#[derive(Debug, Clone, Copy)]
pub struct Array;

impl<T: Float> PsisAdapter<T> for Array {
    type Output = ArrayPsisBuilder<T>;

    fn convert(builder: PsisBuilder<T>) -> Self::Output {
        let mut result = ArrayPsisBuilder::default();

        if let Some(r_eff) = builder.r_eff {
            result.r_eff = Some(r_eff);
        }
        if let Some(source) = builder.source {
            result.source = source;
        }
        if let Some(calc_ess) = builder.calc_ess {
            result.calc_ess = calc_ess;
        }
        if let Some(pts) = builder.min_grid_pts {
            result.min_grid_pts = pts;
        }
        if let Some(wip) = builder.prior_shrinkage {
            result.prior_shrinkage = wip;
        }
        if let Some(method) = builder.cv_method {
            result.cv_method = Some(method);
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(tp) = builder.custom_tail_pass {
            result.custom_tail_pass = Some(tp);
        }
        if let Some(re) = builder.relative_eff_fn {
            result.relative_eff_fn = Some(re);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for the 2-D matrix + chain-index form.
#[derive(Debug, Clone, Copy)]
pub struct Matrix;

impl<T: Float> PsisAdapter<T> for Matrix {
    type Output = MatrixPsisBuilder<T>;

    fn convert(builder: PsisBuilder<T>) -> Self::Output {
        MatrixPsisBuilder {
            inner: Array::convert(builder),
        }
    }
}

/// Marker for the single-vector log-domain form.
#[derive(Debug, Clone, Copy)]
pub struct Vector;

impl<T: Float> PsisAdapter<T> for Vector {
    type Output = VectorPsisBuilder<T>;

    fn convert(builder: PsisBuilder<T>) -> Self::Output {
        let mut result = VectorPsisBuilder::default();

        if let Some(r_eff) = builder.r_eff {
            result.r_eff = r_eff.first().copied();
        }
        if let Some(tail_len) = builder.tail_length {
            result.tail_length = Some(tail_len);
        }
        if let Some(pts) = builder.min_grid_pts {
            result.min_grid_pts = pts;
        }
        if let Some(wip) = builder.prior_shrinkage {
            result.prior_shrinkage = wip;
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}
