#![cfg(feature = "dev")]
//! Tests for the execution engine.
//!
//! These tests verify orchestration over whole log-ratio arrays:
//! - Weight normalization and bounds
//! - Tail length and shape diagnostics per data point
//! - Effective-sample-size computation and its NaN placeholders
//! - Relative-efficiency resolution (supplied, estimated, defaulted)
//! - The custom tail-pass hook
//!
//! ## Test Organization
//!
//! 1. **Weight Invariants** - Sums, bounds, layout
//! 2. **Diagnostics** - ESS, tail lengths, r_eff resolution
//! 3. **Hooks** - Custom pass injection

use approx::assert_relative_eq;
use ndarray::Array3;

use psis::internals::algorithms::tail::default_tail_length;
use psis::internals::engine::executor::{
    tail_pass_sequential, PsisConfig, PsisExecutor, SampleSource, TailPassOutput,
};
use psis::internals::primitives::errors::PsisError;

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

    fn next_uniform(&mut self) -> f64 {
        (self.next_u32() as f64 + 0.5) / (u32::MAX as f64 + 1.0)
    }
}

/// Log-ratio array with smooth variation across draws and chains.
fn log_ratio_array(n_data: usize, n_draw: usize, n_chain: usize, seed: u64) -> Array3<f64> {
    let mut rng = SimpleRng::new(seed);
    Array3::from_shape_fn((n_data, n_draw, n_chain), |_| rng.next_uniform() * 4.0 - 2.0)
}

// ============================================================================
// Weight Invariant Tests
// ============================================================================

/// Each data point's weights sum to 1 and lie in [0, 1].
#[test]
fn test_weights_normalized() {
    let arr = log_ratio_array(4, 250, 2, 1);
    let result = PsisExecutor::run(&arr, &PsisConfig::default()).unwrap();

    assert_eq!(result.weights.dim(), (4, 250, 2));
    assert_eq!(result.data_size, 4);
    assert_eq!(result.posterior_sample_size, 500);

    for i in 0..4 {
        let point = result.weights.index_axis(ndarray::Axis(0), i);
        let sum: f64 = point.iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
        for &w in point.iter() {
            assert!((0.0..=1.0).contains(&w));
        }
    }
}

/// Per-point vectors all have one entry per data point.
#[test]
fn test_result_lengths() {
    let arr = log_ratio_array(6, 100, 4, 2);
    let result = PsisExecutor::run(&arr, &PsisConfig::default()).unwrap();

    assert_eq!(result.pareto_k.len(), 6);
    assert_eq!(result.ess.len(), 6);
    assert_eq!(result.sup_ess.len(), 6);
    assert_eq!(result.r_eff.len(), 6);
    assert_eq!(result.tail_len.len(), 6);
    for &k in result.pareto_k.iter() {
        assert!(k.is_finite());
    }
}

/// Invalid input surfaces before any computation.
#[test]
fn test_invalid_input_fails_fast() {
    let mut arr = log_ratio_array(2, 100, 2, 3);
    arr[[1, 5, 0]] = f64::NAN;

    let err = PsisExecutor::run(&arr, &PsisConfig::default()).unwrap_err();
    assert!(matches!(err, PsisError::InvalidNumericValue(_)));
}

// ============================================================================
// Diagnostics Tests
// ============================================================================

/// ESS diagnostics are bounded by the posterior sample size.
#[test]
fn test_ess_computed() {
    let arr = log_ratio_array(3, 200, 2, 4);
    let result = PsisExecutor::run(&arr, &PsisConfig::default()).unwrap();

    for i in 0..3 {
        let ess = result.ess[i];
        let sup = result.sup_ess[i];
        assert!(ess > 0.0 && ess <= 400.0 + 1e-9, "ess {ess} out of range");
        assert!(sup > 0.0 && sup <= 400.0 + 1e-9, "sup_ess {sup} out of range");
    }
}

/// Disabling ESS leaves NaN placeholders without touching the weights.
#[test]
fn test_ess_disabled_placeholders() {
    let arr = log_ratio_array(3, 200, 2, 4);

    let with = PsisExecutor::run(&arr, &PsisConfig::default()).unwrap();
    let without = PsisExecutor::run(
        &arr,
        &PsisConfig {
            calc_ess: false,
            ..PsisConfig::default()
        },
    )
    .unwrap();

    for i in 0..3 {
        assert!(without.ess[i].is_nan());
        assert!(without.sup_ess[i].is_nan());
    }
    assert_eq!(with.weights, without.weights);
    assert_eq!(with.pareto_k, without.pareto_k);
}

/// Supplied r_eff values flow into tail lengths and the result.
#[test]
fn test_r_eff_supplied() {
    let arr = log_ratio_array(2, 250, 2, 5);
    let config = PsisConfig {
        r_eff: Some(vec![1.0, 0.25]),
        ..PsisConfig::default()
    };
    let result = PsisExecutor::run(&arr, &config).unwrap();

    assert_eq!(result.r_eff[0], 1.0);
    assert_eq!(result.r_eff[1], 0.25);
    assert_eq!(result.tail_len[0], default_tail_length(500, 1.0));
    assert_eq!(result.tail_len[1], default_tail_length(500, 0.25));
}

/// A wrong-length r_eff vector is rejected.
#[test]
fn test_r_eff_length_checked() {
    let arr = log_ratio_array(3, 100, 2, 6);
    let config = PsisConfig {
        r_eff: Some(vec![1.0, 1.0]),
        ..PsisConfig::default()
    };

    let err = PsisExecutor::run(&arr, &config).unwrap_err();
    assert_eq!(
        err,
        PsisError::REffLengthMismatch {
            got: 2,
            expected: 3,
        }
    );
}

/// MCMC sources delegate to an injected relative-efficiency estimator.
#[test]
fn test_relative_eff_estimator() {
    fn half_efficiency(arr: &Array3<f64>) -> Vec<f64> {
        vec![0.5; arr.dim().0]
    }

    let arr = log_ratio_array(3, 250, 2, 7);
    let config = PsisConfig {
        source: SampleSource::Mcmc,
        relative_eff_fn: Some(half_efficiency),
        ..PsisConfig::default()
    };
    let result = PsisExecutor::run(&arr, &config).unwrap();

    for i in 0..3 {
        assert_eq!(result.r_eff[i], 0.5);
        assert_eq!(result.tail_len[i], default_tail_length(500, 0.5));
    }
}

/// Non-MCMC sources ignore the estimator and default to independence.
#[test]
fn test_vi_source_defaults_to_one() {
    fn half_efficiency(arr: &Array3<f64>) -> Vec<f64> {
        vec![0.5; arr.dim().0]
    }

    let arr = log_ratio_array(2, 250, 2, 8);
    let config = PsisConfig {
        source: SampleSource::Vi,
        relative_eff_fn: Some(half_efficiency),
        ..PsisConfig::default()
    };
    let result = PsisExecutor::run(&arr, &config).unwrap();

    assert_eq!(result.r_eff[0], 1.0);
    assert_eq!(result.r_eff[1], 1.0);
}

// ============================================================================
// Hook Tests
// ============================================================================

/// A custom tail pass replaces the sequential default.
#[test]
fn test_custom_tail_pass_hook() {
    fn wrapped_pass(
        rows: &mut [f64],
        sample_size: usize,
        r_eff: &[f64],
        min_grid_pts: usize,
        wip: bool,
    ) -> Result<TailPassOutput<f64>, PsisError> {
        tail_pass_sequential(rows, sample_size, r_eff, min_grid_pts, wip)
    }

    let arr = log_ratio_array(4, 200, 2, 9);

    let default_run = PsisExecutor::run(&arr, &PsisConfig::default()).unwrap();
    let hooked_run = PsisExecutor::run(
        &arr,
        &PsisConfig {
            tail_pass: Some(wrapped_pass),
            ..PsisConfig::default()
        },
    )
    .unwrap();

    assert_eq!(default_run.weights, hooked_run.weights);
    assert_eq!(default_run.pareto_k, hooked_run.pareto_k);
    assert_eq!(default_run.tail_len, hooked_run.tail_len);
}
