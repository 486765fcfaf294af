//! Matrix adapter for the 2-D draws-by-chain-index entry form.
//!
//! ## Purpose
//!
//! This module accepts log ratios as a 2-D matrix [data_point, draw] whose
//! columns are assigned to chains by an explicit chain-index vector, as
//! produced by samplers that concatenate chains column-wise. The matrix is
//! validated, reshaped to the 3-D [data_point, draw, chain] contract, and
//! processed by the same engine path as the array adapter.
//!
//! ## Design notes
//!
//! * **Order preservation**: Within each chain, columns keep their original
//!   left-to-right order in the draw dimension.
//! * **Validation first**: Chain coverage, contiguous numbering from 1, and
//!   equal chain lengths are checked before any reshaping.
//!
//! ## Key concepts
//!
//! * **Chain index**: `chain_index[j]` names the 1-based chain of matrix
//!   column `j`.
//!
//! ## Invariants
//!
//! * Reshaping is a pure permutation: every matrix value appears exactly
//!   once in the 3-D array.
//!
//! ## Non-goals
//!
//! * This adapter does not infer chain boundaries; the index is explicit.

// External dependencies
use core::fmt::Debug;
use ndarray::{Array2, Array3};
use num_traits::Float;

// Internal dependencies
use crate::adapters::array::{ArrayPsis, ArrayPsisBuilder};
use crate::engine::output::{PsisLooResult, PsisResult};
use crate::engine::validator::Validator;
use crate::primitives::errors::PsisError;

// ============================================================================
// Matrix PSIS Builder
// ============================================================================

/// Builder for the 2-D matrix processor.
///
/// Carries the same configuration surface as the array builder; the matrix
/// form only adds the reshape step at entry.
#[derive(Debug, Clone)]
pub struct MatrixPsisBuilder<T: Float> {
    /// Shared configuration, forwarded to the array path after reshaping.
    pub inner: ArrayPsisBuilder<T>,
}

impl<T: Float> Default for MatrixPsisBuilder<T> {
    fn default() -> Self {
        Self {
            inner: ArrayPsisBuilder::default(),
        }
    }
}

impl<T: Float> MatrixPsisBuilder<T> {
    /// Build the matrix processor.
    pub fn build(self) -> Result<MatrixPsis<T>, PsisError> {
        Ok(MatrixPsis {
            inner: self.inner.build()?,
        })
    }
}

// ============================================================================
// Matrix PSIS Processor
// ============================================================================

/// 2-D matrix PSIS processor.
pub struct MatrixPsis<T: Float> {
    inner: ArrayPsis<T>,
}

impl<T: Float + Debug + Send + Sync + 'static> MatrixPsis<T> {
    /// Smooth importance weights from a log-ratio matrix and chain index.
    pub fn smooth(
        self,
        log_ratios: &Array2<T>,
        chain_index: &[usize],
    ) -> Result<PsisResult<T>, PsisError> {
        let arr = reshape_by_chain(log_ratios, chain_index)?;
        self.inner.smooth(&arr)
    }

    /// Estimate out-of-sample predictive performance from a log-likelihood
    /// matrix and chain index.
    pub fn estimate(
        self,
        log_lik: &Array2<T>,
        chain_index: &[usize],
    ) -> Result<PsisLooResult<T>, PsisError> {
        let arr = reshape_by_chain(log_lik, chain_index)?;
        self.inner.estimate(&arr)
    }
}

// ============================================================================
// Reshaping
// ============================================================================

/// Reshape a [data, draw] matrix into the [data, draw, chain] contract.
///
/// Column `j` with `chain_index[j] == c` becomes draw `d` of chain `c`,
/// where `d` counts that chain's columns in matrix order.
pub fn reshape_by_chain<T: Float>(
    matrix: &Array2<T>,
    chain_index: &[usize],
) -> Result<Array3<T>, PsisError> {
    let (n_data, n_cols) = matrix.dim();
    if n_data == 0 || n_cols == 0 {
        return Err(PsisError::EmptyInput);
    }
    Validator::validate_chain_index(chain_index, n_cols)?;

    let n_chain = chain_index.iter().copied().max().unwrap_or(1);
    let n_draw = n_cols / n_chain;

    let mut cols_of_chain = vec![Vec::with_capacity(n_draw); n_chain];
    for (col, &c) in chain_index.iter().enumerate() {
        cols_of_chain[c - 1].push(col);
    }

    let mut arr = Array3::from_elem((n_data, n_draw, n_chain), T::zero());
    for i in 0..n_data {
        for (c, cols) in cols_of_chain.iter().enumerate() {
            for (d, &col) in cols.iter().enumerate() {
                arr[[i, d, c]] = matrix[[i, col]];
            }
        }
    }

    Ok(arr)
}
