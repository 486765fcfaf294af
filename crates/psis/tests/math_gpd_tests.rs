#![cfg(feature = "dev")]
//! Tests for the generalized Pareto fit and quantile function.
//!
//! These tests verify the math layer used for tail smoothing:
//! - Quantile function values, monotonicity, and the `xi -> 0` limit
//! - Profile-likelihood parameter recovery on simulated GPD samples
//! - Weakly-informative prior shrinkage of the fitted shape
//!
//! ## Test Organization
//!
//! 1. **Quantile Function** - Closed-form values and limits
//! 2. **Parameter Recovery** - Simulation-based fit accuracy
//! 3. **Prior Shrinkage** - Direction and magnitude of the shrunk shape

use approx::assert_relative_eq;

use psis::internals::math::gpd::{fit, quantile, DEFAULT_MIN_GRID_PTS};

/// Deterministic 64-bit LCG for simulation tests.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u32(&mut self) -> u32 {
        // LCG constants for 64-bit state
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    /// Uniform draw strictly inside (0, 1).
    fn next_uniform(&mut self) -> f64 {
        (self.next_u32() as f64 + 0.5) / (u32::MAX as f64 + 1.0)
    }
}

/// Draw a sorted GPD sample by inverse-transform sampling.
///
/// Takes the exponential limit explicitly at `xi = 0`, like `quantile`.
fn gpd_sample(n: usize, xi: f64, sigma: f64, seed: u64) -> Vec<f64> {
    let mut rng = SimpleRng::new(seed);
    let mut sample: Vec<f64> = (0..n)
        .map(|_| {
            let u = rng.next_uniform();
            if xi == 0.0 {
                -sigma * (1.0 - u).ln()
            } else {
                sigma * ((1.0 - u).powf(-xi) - 1.0) / xi
            }
        })
        .collect();
    sample.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
    sample
}

// ============================================================================
// Quantile Function Tests
// ============================================================================

/// The quantile at p = 0 is the lower support endpoint.
#[test]
fn test_quantile_at_zero() {
    assert_eq!(quantile(0.0, 0.4, 1.0), 0.0);
    assert_eq!(quantile(0.0, -0.3, 2.0), 0.0);
}

/// The quantile function is strictly increasing in p.
#[test]
fn test_quantile_monotonic_in_p() {
    for &xi in &[-0.5, -0.1, 0.1, 0.4, 1.0, 2.0] {
        let mut prev = quantile(0.0, xi, 1.0);
        for i in 1..100 {
            let p = i as f64 / 100.0;
            let q = quantile(p, xi, 1.0);
            assert!(
                q > prev,
                "quantile not increasing at p={p} for xi={xi}: {q} <= {prev}"
            );
            prev = q;
        }
    }
}

/// A vanishing shape reduces to the exponential distribution quantile.
#[test]
fn test_quantile_zero_shape_limit() {
    for i in 1..20 {
        let p = i as f64 / 20.0;
        let exponential = -2.0 * (1.0 - p).ln();

        // Exact zero takes the guarded branch.
        assert_relative_eq!(quantile(p, 0.0, 2.0), exponential, max_relative = 1e-12);

        // A shape just outside the guard agrees with the limit.
        assert_relative_eq!(quantile(p, 1e-8, 2.0), exponential, max_relative = 1e-6);
    }
}

/// A negative shape has a finite upper endpoint `-sigma / xi`.
#[test]
fn test_quantile_negative_shape_bounded() {
    let xi = -0.5;
    let sigma = 1.0;
    let endpoint = -sigma / xi;

    for i in 1..1000 {
        let p = i as f64 / 1000.0;
        assert!(quantile(p, xi, sigma) < endpoint);
    }
}

/// The quantile scales linearly in sigma.
#[test]
fn test_quantile_scale_linearity() {
    let q1 = quantile(0.7, 0.3, 1.0);
    let q3 = quantile(0.7, 0.3, 3.0);
    assert_relative_eq!(q3, 3.0 * q1, max_relative = 1e-12);
}

// ============================================================================
// Parameter Recovery Tests
// ============================================================================

/// The fit recovers the shape and scale of a heavy-tailed GPD sample.
#[test]
fn test_fit_recovers_heavy_tail() {
    let sample = gpd_sample(20_000, 0.4, 1.0, 42);
    let fit = fit(&sample, 1.0, false, DEFAULT_MIN_GRID_PTS);

    assert!(
        (fit.xi - 0.4_f64).abs() < 0.05,
        "xi estimate {} too far from 0.4",
        fit.xi
    );
    assert_relative_eq!(fit.sigma, 1.0, max_relative = 0.1);
}

/// The fit recovers a short-tailed (negative shape) sample.
#[test]
fn test_fit_recovers_short_tail() {
    let sample = gpd_sample(2000, -0.2, 1.0, 7);
    let result = fit(&sample, 1.0, false, DEFAULT_MIN_GRID_PTS);

    assert!(
        (result.xi - (-0.2_f64)).abs() < 0.1,
        "xi estimate {} too far from -0.2",
        result.xi
    );
    assert_relative_eq!(result.sigma, 1.0, max_relative = 0.15);
}

/// The fit is deterministic: the same sample yields the same parameters.
#[test]
fn test_fit_deterministic() {
    let sample = gpd_sample(500, 0.3, 2.0, 11);
    let a = fit(&sample, 1.0, true, DEFAULT_MIN_GRID_PTS);
    let b = fit(&sample, 1.0, true, DEFAULT_MIN_GRID_PTS);
    assert_eq!(a, b);
}

/// The sigma estimate stays positive for positive-support samples.
#[test]
fn test_fit_sigma_positive() {
    for seed in [1, 2, 3, 4, 5] {
        let sample = gpd_sample(200, 0.5, 1.5, seed);
        let result = fit(&sample, 1.0, true, DEFAULT_MIN_GRID_PTS);
        assert!(result.sigma > 0.0, "sigma {} not positive", result.sigma);
    }
}

// ============================================================================
// Prior Shrinkage Tests
// ============================================================================

/// The weakly-informative prior pulls the shape toward 0.5.
#[test]
fn test_wip_shrinks_toward_half() {
    let sample = gpd_sample(50, 0.0, 1.0, 99);

    let raw = fit(&sample, 1.0, false, DEFAULT_MIN_GRID_PTS);
    let shrunk = fit(&sample, 1.0, true, DEFAULT_MIN_GRID_PTS);

    // Shrunk shape lies strictly between the raw estimate and 0.5.
    if raw.xi < 0.5 {
        assert!(shrunk.xi > raw.xi && shrunk.xi < 0.5);
    } else {
        assert!(shrunk.xi < raw.xi && shrunk.xi > 0.5);
    }

    // The scale is untouched by shrinkage.
    assert_eq!(raw.sigma, shrunk.sigma);
}

/// The shrinkage matches its closed form.
#[test]
fn test_wip_closed_form() {
    let sample = gpd_sample(80, 0.4, 1.0, 5);
    let n = sample.len() as f64;

    let raw = fit(&sample, 1.0, false, DEFAULT_MIN_GRID_PTS);
    let shrunk = fit(&sample, 1.0, true, DEFAULT_MIN_GRID_PTS);

    let expected = (raw.xi * n + 0.5 * 10.0) / (n + 10.0);
    assert_relative_eq!(shrunk.xi, expected, max_relative = 1e-12);
}

/// Lower relative efficiency increases the prior's pull.
#[test]
fn test_wip_r_eff_scaling() {
    let sample = gpd_sample(100, 0.1, 1.0, 13);

    let full = fit(&sample, 1.0, true, DEFAULT_MIN_GRID_PTS);
    let quarter = fit(&sample, 0.25, true, DEFAULT_MIN_GRID_PTS);

    // Both shrink toward 0.5; the less efficient sample shrinks further.
    assert!((quarter.xi - 0.5).abs() < (full.xi - 0.5).abs());
}
