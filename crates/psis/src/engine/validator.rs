//! Input validation for PSIS configuration and data.
//!
//! ## Purpose
//!
//! This module provides the validation functions for PSIS input arrays,
//! relative-efficiency vectors, and chain-index layouts. It checks
//! requirements such as non-emptiness, finite values, and chain coverage.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive; the full
//!   finiteness scan runs last.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Array contract**: [data_point, draw, chain], every value finite.
//! * **Chain coverage**: Every matrix column assigned a chain, chains
//!   numbered contiguously from 1, all chains equal length.
//! * **Vector entry form**: NaN is rejected but infinities are allowed, so
//!   the per-point `xi = +inf` degradation stays observable.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or reshape data.
//! * This module does not provide automatic correction of invalid inputs.

// External dependencies
use ndarray::Array3;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PsisError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for PSIS inputs.
///
/// Provides static methods returning `Result<(), PsisError>`; each fails
/// fast upon the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate a [data, draw, chain] array: non-empty, all values finite.
    pub fn validate_array<T: Float>(arr: &Array3<T>) -> Result<(), PsisError> {
        let (n_data, n_draw, n_chain) = arr.dim();
        if n_data == 0 || n_draw == 0 || n_chain == 0 {
            return Err(PsisError::EmptyInput);
        }

        for ((i, d, c), &v) in arr.indexed_iter() {
            if !v.is_finite() {
                return Err(PsisError::InvalidNumericValue(format!(
                    "array[{i},{d},{c}]={}",
                    v.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok(())
    }

    /// Validate a single-point ratio vector: non-empty and NaN-free.
    ///
    /// Infinities pass through here; the tail smoother maps an infinite tail
    /// value to `xi = +inf` instead of failing.
    pub fn validate_vector<T: Float>(values: &[T]) -> Result<(), PsisError> {
        if values.is_empty() {
            return Err(PsisError::EmptyInput);
        }

        for (i, &v) in values.iter().enumerate() {
            if v.is_nan() {
                return Err(PsisError::InvalidNumericValue(format!("ratios[{i}]=NaN")));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate a relative-efficiency vector against the data-point count.
    pub fn validate_r_eff<T: Float>(r_eff: &[T], n_data: usize) -> Result<(), PsisError> {
        if r_eff.len() != n_data {
            return Err(PsisError::REffLengthMismatch {
                got: r_eff.len(),
                expected: n_data,
            });
        }

        for &r in r_eff {
            if !r.is_finite() || r <= T::zero() {
                return Err(PsisError::InvalidREff(r.to_f64().unwrap_or(f64::NAN)));
            }
        }

        Ok(())
    }

    /// Validate a chain-index vector for the matrix entry form.
    ///
    /// Requires every column assigned, chains numbered 1..=C with no gaps,
    /// and all chains of equal length.
    pub fn validate_chain_index(chain_index: &[usize], n_cols: usize) -> Result<(), PsisError> {
        if chain_index.len() != n_cols {
            return Err(PsisError::InvalidChainIndex(format!(
                "{} entries for {} matrix columns",
                chain_index.len(),
                n_cols
            )));
        }

        let n_chains = match chain_index.iter().copied().max() {
            Some(max) if max >= 1 => max,
            _ => {
                return Err(PsisError::InvalidChainIndex(
                    "chains must be numbered from 1".to_string(),
                ));
            }
        };

        let mut counts = vec![0usize; n_chains];
        for &c in chain_index {
            if c == 0 {
                return Err(PsisError::InvalidChainIndex(
                    "chains must be numbered from 1".to_string(),
                ));
            }
            counts[c - 1] += 1;
        }

        let first = counts[0];
        for (c, &count) in counts.iter().enumerate() {
            if count == 0 {
                return Err(PsisError::InvalidChainIndex(format!(
                    "chain numbering is not contiguous: chain {} has no columns",
                    c + 1
                )));
            }
            if count != first {
                return Err(PsisError::InvalidChainIndex(format!(
                    "chains have unequal lengths: chain 1 has {first} columns, chain {} has {count}",
                    c + 1
                )));
            }
        }

        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), PsisError> {
        if let Some(param) = duplicate_param {
            return Err(PsisError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
