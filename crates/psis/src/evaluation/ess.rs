//! Effective sample size of normalized importance weights.
//!
//! ## Purpose
//!
//! This module measures how many independent draws a set of normalized
//! importance weights is worth, adjusted for the autocorrelation of the
//! underlying draws through the relative efficiency `r_eff`.
//!
//! ## Design notes
//!
//! * **Two estimators**: The variance-based ESS is the standard importance
//!   sampling diagnostic; the supremum-based ESS is more sensitive to a
//!   single dominating weight at the cost of higher variance.
//! * **Inputs are normalized**: Both estimators assume the weight slice sums
//!   to 1 (the engine normalizes before calling in here).
//!
//! ## Invariants
//!
//! * For uniform weights over `n` draws, both estimators return `r_eff * n`.
//! * Results are in `(0, r_eff * n]` for any proper weight distribution.
//!
//! ## Non-goals
//!
//! * This module does not estimate `r_eff` itself; autocorrelation-aware
//!   estimation over raw draws is an external collaborator.

// External dependencies
use num_traits::Float;

// ============================================================================
// Estimators
// ============================================================================

/// Variance-based effective sample size: `r_eff / sum(w^2)`.
#[inline]
pub fn variance_ess<T: Float>(weights: &[T], r_eff: T) -> T {
    let sum_sq = weights.iter().fold(T::zero(), |acc, &w| acc + w * w);
    r_eff / sum_sq
}

/// Supremum-based effective sample size: `r_eff / max(w)`.
///
/// Tracks the single largest weight, so it degrades faster than the
/// variance-based estimate when importance sampling starts to fail.
#[inline]
pub fn supremum_ess<T: Float>(weights: &[T], r_eff: T) -> T {
    let max = weights
        .iter()
        .copied()
        .fold(T::neg_infinity(), |a, w| if w > a { w } else { a });
    r_eff / max
}
