//! Generalized Pareto distribution: profile-likelihood fit and quantiles.
//!
//! ## Purpose
//!
//! This module estimates the shape (`xi`) and scale (`sigma`) of a
//! generalized Pareto distribution from a tail sample, and inverts its CDF.
//! The estimator is the Zhang & Stephens (2009) profile-likelihood grid
//! method with an optional weakly-informative prior on the shape, following
//! Vehtari, Gelman & Gabry (2024).
//!
//! ## Design notes
//!
//! * **Grid, not optimization**: The profile likelihood is evaluated over a
//!   closed-form grid of candidate inverse scales and averaged under a
//!   stable softmax; no iterative solver, no convergence failures.
//! * **Prior shrinkage**: With `wip`, the fitted shape is shrunk toward 0.5
//!   with a pseudo-count of 10, scaled by the relative efficiency. This
//!   reduces estimator variance for short tails.
//! * **Pure**: Neither function mutates its input; validation (length,
//!   sortedness, positivity) is the caller's responsibility.
//!
//! ## Key concepts
//!
//! * **Profile likelihood**: For each inverse scale `theta`, the shape that
//!   maximizes the likelihood has the closed form `mean(log1p(-theta * x))`.
//! * **Plotting positions**: Callers evaluate `quantile` at `(rank - 0.5)/m`
//!   to generate theoretical order statistics.
//!
//! ## Invariants
//!
//! * `quantile(p, xi, sigma)` is strictly increasing in `p` on `[0, 1)` for
//!   `sigma > 0`.
//! * The `xi -> 0` limit is handled explicitly; no division by a vanishing
//!   shape.
//!
//! ## Non-goals
//!
//! * This module does not select the tail or validate it (see `algorithms`).
//! * This module does not compute densities or random draws.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::stable::softmax_in_place;

// ============================================================================
// Constants
// ============================================================================

/// Default number of base grid points for the profile-likelihood search.
pub const DEFAULT_MIN_GRID_PTS: usize = 30;

/// Prior scale divisor in the grid seed (Zhang & Stephens).
const PRIOR_SCALE: f64 = 3.0;

/// Pseudo-count of the weakly-informative prior on the shape.
const PRIOR_PSEUDO_COUNT: f64 = 10.0;

/// Center of the weakly-informative prior on the shape.
const PRIOR_SHAPE_CENTER: f64 = 0.5;

// ============================================================================
// Fitting
// ============================================================================

/// Fitted generalized Pareto parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpdFit<T> {
    /// Shape parameter (the Pareto-k diagnostic when fitted to a weight tail).
    pub xi: T,
    /// Scale parameter.
    pub sigma: T,
}

/// Fit a generalized Pareto distribution to a sorted, zero-anchored sample.
///
/// `sample` must be sorted ascending with support starting at (or near) zero;
/// the caller enforces `sample.len() >= 5`. `r_eff` scales the effective
/// sample size in the prior shrinkage step; pass 1 for independent draws.
pub fn fit<T: Float>(sample: &[T], r_eff: T, wip: bool, min_grid_pts: usize) -> GpdFit<T> {
    let n = sample.len();
    let n_t = T::from(n).unwrap();

    let grid_size = min_grid_pts + (n_t.sqrt().floor()).to_usize().unwrap_or(0);
    let m_t = T::from(grid_size).unwrap();

    let x_max = sample[n - 1];
    // Empirical 25th percentile of the sample (1-based floor(n/4 + 0.5)).
    let quart_idx = (n as f64 / 4.0 + 0.5).floor() as usize;
    let x_quart = sample[quart_idx.max(1) - 1];

    let prior_scale = T::from(PRIOR_SCALE).unwrap();
    let half = T::from(0.5).unwrap();

    // Candidate inverse scales and their profile log-likelihoods.
    let mut thetas = Vec::with_capacity(grid_size);
    let mut log_lik = Vec::with_capacity(grid_size);
    for j in 1..=grid_size {
        let j_t = T::from(j).unwrap();
        let theta = T::one() / x_max
            + (T::one() - (m_t / (j_t - half)).sqrt()) / (prior_scale * x_quart);

        let xi_hat = mean_log1p_scaled(sample, theta);

        // Profile log-likelihood; outside the valid region the candidate gets
        // zero softmax weight.
        let ratio = -theta / xi_hat;
        let l = if xi_hat != T::zero() && ratio > T::zero() {
            n_t * (ratio.ln() - xi_hat - T::one())
        } else {
            T::neg_infinity()
        };

        thetas.push(theta);
        log_lik.push(l);
    }

    softmax_in_place(&mut log_lik);
    let theta_bar = thetas
        .iter()
        .zip(log_lik.iter())
        .fold(T::zero(), |acc, (&t, &w)| acc + t * w);

    let mut xi = mean_log1p_scaled(sample, theta_bar);
    let sigma = -xi / theta_bar;

    if wip {
        let pseudo = T::from(PRIOR_PSEUDO_COUNT).unwrap();
        let center = T::from(PRIOR_SHAPE_CENTER).unwrap();
        xi = (r_eff * xi * n_t + center * pseudo) / (r_eff * n_t + pseudo);
    }

    GpdFit { xi, sigma }
}

/// `mean(log1p(-theta * x))` over the sample.
#[inline]
fn mean_log1p_scaled<T: Float>(sample: &[T], theta: T) -> T {
    let sum = sample
        .iter()
        .fold(T::zero(), |acc, &x| acc + (-theta * x).ln_1p());
    sum / T::from(sample.len()).unwrap()
}

// ============================================================================
// Quantiles
// ============================================================================

/// Inverse CDF of the generalized Pareto distribution for `p` in `[0, 1)`.
///
/// `sigma * expm1(-xi * log1p(-p)) / xi`, with the exponential-distribution
/// limit `-sigma * log1p(-p)` taken explicitly as `xi -> 0`. The grid fit
/// never returns an exact zero shape, but the guard keeps the function total.
#[inline]
pub fn quantile<T: Float>(p: T, xi: T, sigma: T) -> T {
    let neg_log_sf = -(-p).ln_1p();
    if xi.abs() < T::epsilon() {
        sigma * neg_log_sf
    } else {
        sigma * (xi * neg_log_sf).exp_m1() / xi
    }
}
