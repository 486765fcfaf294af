//! Pareto smoothing of a single data point's importance ratios.
//!
//! ## Purpose
//!
//! This module implements the per-data-point smoothing step: isolate the
//! upper tail of one ratio vector, fit a generalized Pareto distribution to
//! it, and replace the noisy empirical order statistics with theoretical
//! order statistics from the fitted distribution.
//!
//! ## Design notes
//!
//! * **In place**: The row is mutated directly; the tail permutation is
//!   restored by writing back through remembered indices.
//! * **Owned scratch**: All intermediate state lives in a caller-provided
//!   [`TailBuffer`], allocated once per task and reused across the
//!   per-point loop.
//! * **Raw ratios are canonical**: The log-domain entry reduces to the raw
//!   procedure. The tail always contains the row maximum, so the stability
//!   shift for the tail equals the global maximum; exponentiating relative
//!   to it and mapping back with `ln(v) + max` reproduces the raw path
//!   exactly.
//!
//! ## Key concepts
//!
//! * **Tail length**: `min(ceil(n/5), ceil(3 * sqrt(n / r_eff)))` — at most a
//!   fifth of the sample, shorter when autocorrelation cuts the effective
//!   sample size.
//! * **Plotting positions**: Tail rank `r` (1-based) maps to quantile
//!   `(r - 0.5) / tail_len`.
//!
//! ## Invariants
//!
//! * Smoothed rows stay within `[0, 1]` (ratios are pre-scaled to max 1).
//! * Values at or below the cutoff are never modified; only strict
//!   exceedances are fitted, so the shifted sample handed to the GPD fitter
//!   is strictly positive.
//! * The returned shape is finite (or the call errs), except for an infinite
//!   tail value, which short-circuits to `xi = +inf` with the row untouched.
//!
//! ## Non-goals
//!
//! * This module does not normalize weights (engine's responsibility).
//! * This module does not validate whole-array inputs (validator's job).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::gpd;
use crate::primitives::buffer::TailBuffer;
use crate::primitives::errors::{PsisError, TailReason};
use crate::primitives::sorting::{partition_tail, scatter_tail};

// ============================================================================
// Constants
// ============================================================================

/// Minimum number of tail elements for a defined GPD fit.
pub const MIN_TAIL_LEN: usize = 5;

// ============================================================================
// Tail Length
// ============================================================================

/// Default tail length for a sample of `len` draws with relative efficiency
/// `r_eff`: `min(ceil(len/5), ceil(3 * sqrt(len / r_eff)))`.
pub fn default_tail_length<T: Float>(len: usize, r_eff: T) -> usize {
    let fifth = len.div_ceil(5);
    let len_t = T::from(len).unwrap();
    let three = T::from(3.0).unwrap();
    let sqrt_term = (three * (len_t / r_eff).sqrt()).ceil();
    let sqrt_len = sqrt_term.to_usize().unwrap_or(usize::MAX);
    fifth.min(sqrt_len)
}

// ============================================================================
// Smoothing (raw-ratio domain)
// ============================================================================

/// Smooth the upper tail of a ratio row pre-scaled so its maximum is 1.
///
/// Returns the fitted shape `xi` (the Pareto-k diagnostic) and the tail
/// length actually fitted. A shape of `+inf` signals an infinite tail
/// value — failed importance sampling for this point — and leaves the row
/// unchanged.
///
/// The fitted tail is the strict exceedance over the cutoff: values tied
/// with it are dropped, so the shifted sample handed to the fitter is
/// strictly positive. When fewer than [`MIN_TAIL_LEN`] exceedances remain,
/// the tail is degenerate.
pub fn smooth_ratio_row<T: Float>(
    row: &mut [T],
    tail_len: usize,
    r_eff: T,
    wip: bool,
    min_grid_pts: usize,
    buf: &mut TailBuffer<T>,
) -> Result<(T, usize), PsisError> {
    let n = row.len();

    if tail_len < MIN_TAIL_LEN || tail_len >= n {
        return Err(PsisError::DegenerateTail {
            tail_len,
            reason: TailReason::TooShort,
        });
    }

    let cutoff = partition_tail(row, tail_len, &mut buf.pairs);
    let tail_max = buf.pairs[n - 1].0;

    if tail_max.is_infinite() {
        return Ok((T::infinity(), tail_len));
    }

    // Keep only strict exceedances: ties with the cutoff belong to the body.
    let mut tail_start = n - tail_len;
    while tail_start < n && buf.pairs[tail_start].0 == cutoff {
        tail_start += 1;
    }
    let fitted_len = n - tail_start;

    if fitted_len < MIN_TAIL_LEN {
        return Err(PsisError::DegenerateTail {
            tail_len: fitted_len,
            reason: TailReason::TooShort,
        });
    }
    if buf.pairs[tail_start].0 == tail_max {
        return Err(PsisError::DegenerateTail {
            tail_len: fitted_len,
            reason: TailReason::Constant,
        });
    }

    // Move the tail's support to start at zero, as the fitter requires.
    buf.tail.clear();
    buf.tail
        .extend(buf.pairs[tail_start..].iter().map(|&(v, _)| v - cutoff));

    let fit = gpd::fit(&buf.tail, r_eff, wip, min_grid_pts);

    // Replace empirical order statistics with fitted ones.
    let fitted_len_t = T::from(fitted_len).unwrap();
    let half = T::from(0.5).unwrap();
    for (rank0, pair) in buf.pairs[tail_start..].iter_mut().enumerate() {
        let p = (T::from(rank0).unwrap() + half) / fitted_len_t;
        pair.0 = cutoff + gpd::quantile(p, fit.xi, fit.sigma);
    }

    scatter_tail(row, &buf.pairs[tail_start..]);

    // Smoothing can push a tail value slightly past the pre-scaled maximum.
    for v in row.iter_mut() {
        *v = v.min(T::one()).max(T::zero());
    }

    Ok((fit.xi, fitted_len))
}

// ============================================================================
// Smoothing (log domain)
// ============================================================================

/// Smooth the upper tail of a log-ratio row in place.
///
/// The row is shifted by its maximum, exponentiated, smoothed with
/// [`smooth_ratio_row`], and mapped back with `ln(v) + max`.
pub fn smooth_log_row<T: Float>(
    row: &mut [T],
    tail_len: usize,
    r_eff: T,
    wip: bool,
    min_grid_pts: usize,
    buf: &mut TailBuffer<T>,
) -> Result<(T, usize), PsisError> {
    let max = row
        .iter()
        .copied()
        .fold(T::neg_infinity(), |a, v| if v > a { v } else { a });

    if max == T::infinity() {
        // An infinite log ratio dominates the tail; nothing to smooth.
        return Ok((T::infinity(), tail_len));
    }
    if max == T::neg_infinity() {
        return Err(PsisError::DegenerateTail {
            tail_len,
            reason: TailReason::Constant,
        });
    }

    for v in row.iter_mut() {
        *v = (*v - max).exp();
    }

    let (xi, fitted_len) = smooth_ratio_row(row, tail_len, r_eff, wip, min_grid_pts, buf)?;

    for v in row.iter_mut() {
        *v = v.ln() + max;
    }

    Ok((xi, fitted_len))
}
