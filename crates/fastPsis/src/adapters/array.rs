//! Array adapter for PSIS with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the 3-D array execution adapter with an optional
//! rayon-parallel tail pass, suitable for large numbers of data points.
//!
//! ## Design notes
//!
//! * **Delegation**: Validation and orchestration stay in the `psis` crate;
//!   this adapter only swaps the tail pass.
//! * **Parallel-First**: Defaults to parallel execution.
//!
//! ## Invariants
//!
//! * Results are identical to the sequential adapter for the same input.
//!
//! ## Non-goals
//!
//! * This adapter does not accept 2-D matrices (use the matrix adapter).

// Feature-gated imports
#[cfg(feature = "cpu")]
use crate::engine::executor::tail_pass_parallel;

// External dependencies
use ndarray::Array3;
use num_traits::Float;
use std::fmt::Debug;

// Export dependencies from psis crate
use psis::internals::adapters::array::ArrayPsisBuilder;
use psis::internals::engine::executor::SampleSource;
use psis::internals::engine::output::{PsisLooResult, PsisResult};
use psis::internals::evaluation::cv::CvMethod;
use psis::internals::primitives::errors::PsisError;

// ============================================================================
// Extended Array PSIS Builder
// ============================================================================

/// Builder for the 3-D array processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelArrayPsisBuilder<T: Float> {
    /// Base builder from the psis crate
    pub base: ArrayPsisBuilder<T>,
}

impl<T: Float> Default for ParallelArrayPsisBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ParallelArrayPsisBuilder<T> {
    /// Create a new array builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * All base parameters from the psis `ArrayPsisBuilder`
    /// * parallel: true (fastPsis extension)
    fn new() -> Self {
        let base = ArrayPsisBuilder::default().parallel(true);
        Self { base }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set per-point relative efficiencies.
    pub fn r_eff(mut self, r_eff: Vec<T>) -> Self {
        self.base = self.base.r_eff(r_eff);
        self
    }

    /// Set the origin of the posterior draws.
    pub fn source(mut self, source: SampleSource) -> Self {
        self.base = self.base.source(source);
        self
    }

    /// Enable or disable effective-sample-size computation.
    pub fn calc_ess(mut self, enabled: bool) -> Self {
        self.base = self.base.calc_ess(enabled);
        self
    }

    /// Set the cross-validation method used by `estimate`.
    pub fn cv_method(mut self, method: CvMethod) -> Self {
        self.base = self.base.cv_method(method);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the array processor.
    pub fn build(self) -> Result<ParallelArrayPsis<T>, PsisError> {
        // Check for deferred errors from adapter conversion
        if let Some(ref err) = self.base.deferred_error {
            return Err(err.clone());
        }

        // Validate by attempting to build the base processor
        // This reuses the validation logic centralized in the psis crate
        let _ = self.base.clone().build()?;

        Ok(ParallelArrayPsis { config: self })
    }
}

// ============================================================================
// Extended Array PSIS Processor
// ============================================================================

/// 3-D array PSIS processor with parallel support.
pub struct ParallelArrayPsis<T: Float> {
    config: ParallelArrayPsisBuilder<T>,
}

impl<T: Float + Debug + Send + Sync + 'static> ParallelArrayPsis<T> {
    /// Smooth importance weights from log importance ratios.
    pub fn smooth(self, log_ratios: &Array3<T>) -> Result<PsisResult<T>, PsisError> {
        let base = configure_pass(self.config.base);
        base.build()?.smooth(log_ratios)
    }

    /// Estimate out-of-sample predictive performance from pointwise
    /// log-likelihoods.
    pub fn estimate(self, log_lik: &Array3<T>) -> Result<PsisLooResult<T>, PsisError> {
        let base = configure_pass(self.config.base);
        base.build()?.estimate(log_lik)
    }
}

/// Inject the parallel tail pass when parallel mode is requested.
pub(crate) fn configure_pass<T: Float + Send + Sync>(
    mut base: ArrayPsisBuilder<T>,
) -> ArrayPsisBuilder<T> {
    #[cfg(feature = "cpu")]
    {
        if base.parallel.unwrap_or(true) {
            base = base.custom_tail_pass(tail_pass_parallel);
        } else {
            base.custom_tail_pass = None;
        }
    }
    #[cfg(not(feature = "cpu"))]
    {
        // Fallback to sequential if cpu feature is disabled
        base.custom_tail_pass = None;
    }
    base
}
