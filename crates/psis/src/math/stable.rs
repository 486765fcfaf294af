//! Numerically stable exponential-domain reductions.
//!
//! ## Purpose
//!
//! This module provides the log-sum-exp and softmax primitives used wherever
//! the crate moves between log space and probability space: converting
//! profile log-likelihoods to grid weights, and aggregating log-likelihoods
//! into LOO estimates.
//!
//! ## Design notes
//!
//! * **Max-shift**: Both routines subtract the maximum before exponentiating,
//!   so inputs far below zero neither underflow to a degenerate distribution
//!   nor overflow.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * `softmax_in_place` leaves a distribution: non-negative entries summing to 1.
//! * `log_sum_exp` of an all-`-inf` slice is `-inf`.
//!
//! ## Non-goals
//!
//! * This module does not validate inputs; callers guarantee non-empty slices.

// External dependencies
use num_traits::Float;

// ============================================================================
// Log-Sum-Exp
// ============================================================================

/// Compute `ln(sum(exp(x)))` with the max-shift trick.
#[inline]
pub fn log_sum_exp<T: Float>(values: &[T]) -> T {
    let max = values
        .iter()
        .copied()
        .fold(T::neg_infinity(), |a, v| if v > a { v } else { a });

    if !max.is_finite() {
        // All -inf (empty sum), or a +inf dominates either way.
        return max;
    }

    let sum = values
        .iter()
        .fold(T::zero(), |acc, &v| acc + (v - max).exp());

    max + sum.ln()
}

// ============================================================================
// Softmax
// ============================================================================

/// Convert log-weights to a normalized weight distribution in place.
#[inline]
pub fn softmax_in_place<T: Float>(values: &mut [T]) {
    let max = values
        .iter()
        .copied()
        .fold(T::neg_infinity(), |a, v| if v > a { v } else { a });

    let mut sum = T::zero();
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum = sum + *v;
    }

    for v in values.iter_mut() {
        *v = *v / sum;
    }
}
