//! Matrix adapter for PSIS with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the 2-D matrix + chain-index adapter with the
//! rayon-parallel tail pass. The matrix is validated and reshaped by the
//! `psis` crate before the parallel path runs.
//!
//! ## Invariants
//!
//! * Results are identical to the sequential matrix adapter.
//!
//! ## Non-goals
//!
//! * This adapter does not infer chain boundaries; the index is explicit.

// External dependencies
use ndarray::Array2;
use num_traits::Float;
use std::fmt::Debug;

// Export dependencies from psis crate
use psis::internals::adapters::array::ArrayPsisBuilder;
use psis::internals::adapters::matrix::reshape_by_chain;
use psis::internals::engine::output::{PsisLooResult, PsisResult};
use psis::internals::primitives::errors::PsisError;

// Internal dependencies
use crate::adapters::array::configure_pass;

// ============================================================================
// Extended Matrix PSIS Builder
// ============================================================================

/// Builder for the 2-D matrix processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelMatrixPsisBuilder<T: Float> {
    /// Base array builder from the psis crate (the matrix form shares its
    /// configuration surface).
    pub base: ArrayPsisBuilder<T>,
}

impl<T: Float> Default for ParallelMatrixPsisBuilder<T> {
    fn default() -> Self {
        Self {
            base: ArrayPsisBuilder::default().parallel(true),
        }
    }
}

impl<T: Float> ParallelMatrixPsisBuilder<T> {
    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

    /// Build the matrix processor.
    pub fn build(self) -> Result<ParallelMatrixPsis<T>, PsisError> {
        if let Some(ref err) = self.base.deferred_error {
            return Err(err.clone());
        }

        let _ = self.base.clone().build()?;

        Ok(ParallelMatrixPsis { config: self })
    }
}

// ============================================================================
// Extended Matrix PSIS Processor
// ============================================================================

/// 2-D matrix PSIS processor with parallel support.
pub struct ParallelMatrixPsis<T: Float> {
    config: ParallelMatrixPsisBuilder<T>,
}

impl<T: Float + Debug + Send + Sync + 'static> ParallelMatrixPsis<T> {
    /// Smooth importance weights from a log-ratio matrix and chain index.
    pub fn smooth(
        self,
        log_ratios: &Array2<T>,
        chain_index: &[usize],
    ) -> Result<PsisResult<T>, PsisError> {
        let arr = reshape_by_chain(log_ratios, chain_index)?;
        let base = configure_pass(self.config.base);
        base.build()?.smooth(&arr)
    }

    /// Estimate out-of-sample predictive performance from a log-likelihood
    /// matrix and chain index.
    pub fn estimate(
        self,
        log_lik: &Array2<T>,
        chain_index: &[usize],
    ) -> Result<PsisLooResult<T>, PsisError> {
        let arr = reshape_by_chain(log_lik, chain_index)?;
        let base = configure_pass(self.config.base);
        base.build()?.estimate(&arr)
    }
}
