#![cfg(feature = "dev")]
//! Tests for shape diagnostics and effective sample sizes.
//!
//! These tests verify the advisory layer over fitted Pareto shapes:
//! - Severity tier boundaries
//! - Tier tallies across data points
//! - Variance- and supremum-based ESS formulas
//!
//! ## Test Organization
//!
//! 1. **Classification** - Tier thresholds and edge values
//! 2. **Tallies** - Aggregate counts
//! 3. **Effective Sample Size** - Closed-form checks

use approx::assert_relative_eq;

use psis::internals::evaluation::diagnostics::{
    DiagnosticCounts, ShapeStatus, K_ACCEPTABLE, K_INFORMATIONAL, K_SEVERE,
};
use psis::internals::evaluation::ess::{supremum_ess, variance_ess};

// ============================================================================
// Classification Tests
// ============================================================================

/// Representative values land in the documented tiers.
#[test]
fn test_tier_classification() {
    assert_eq!(ShapeStatus::classify(0.3), ShapeStatus::Acceptable);
    assert_eq!(ShapeStatus::classify(0.6), ShapeStatus::Informational);
    assert_eq!(ShapeStatus::classify(0.8), ShapeStatus::High);
    assert_eq!(ShapeStatus::classify(1.2), ShapeStatus::Severe);
    assert_eq!(ShapeStatus::classify(-0.5), ShapeStatus::Acceptable);
}

/// Thresholds belong to the upper tier.
#[test]
fn test_tier_boundaries() {
    assert_eq!(ShapeStatus::classify(K_ACCEPTABLE), ShapeStatus::Informational);
    assert_eq!(ShapeStatus::classify(K_INFORMATIONAL), ShapeStatus::High);
    assert_eq!(ShapeStatus::classify(K_SEVERE), ShapeStatus::Severe);
}

/// An infinite shape (failed importance sampling) is always severe.
#[test]
fn test_infinite_shape_severe() {
    assert_eq!(ShapeStatus::classify(f64::INFINITY), ShapeStatus::Severe);
}

/// Every tier carries a non-empty advisory string.
#[test]
fn test_advice_strings() {
    for status in [
        ShapeStatus::Acceptable,
        ShapeStatus::Informational,
        ShapeStatus::High,
        ShapeStatus::Severe,
    ] {
        assert!(!status.advice().is_empty());
    }
}

// ============================================================================
// Tally Tests
// ============================================================================

/// Tally counts match the classification of each point.
#[test]
fn test_tally_counts() {
    let ks = [0.1, 0.45, 0.55, 0.65, 0.75, 0.99, 1.0, f64::INFINITY];
    let counts = DiagnosticCounts::tally(ks.iter().copied());

    assert_eq!(counts.acceptable, 2);
    assert_eq!(counts.informational, 2);
    assert_eq!(counts.high, 2);
    assert_eq!(counts.severe, 2);
    assert_eq!(counts.total(), 8);
    assert!(counts.any_flagged());
}

/// An all-acceptable run raises no flags.
#[test]
fn test_tally_clean_run() {
    let counts = DiagnosticCounts::tally([0.1, 0.2, 0.3, 0.49].iter().copied());

    assert_eq!(counts.acceptable, 4);
    assert_eq!(counts.total(), 4);
    assert!(!counts.any_flagged());
}

// ============================================================================
// Effective Sample Size Tests
// ============================================================================

/// Uniform weights give the full (efficiency-scaled) sample size.
#[test]
fn test_ess_uniform_weights() {
    let n = 100;
    let weights = vec![1.0 / n as f64; n];

    assert_relative_eq!(variance_ess(&weights, 1.0), n as f64, epsilon = 1e-9);
    assert_relative_eq!(supremum_ess(&weights, 1.0), n as f64, epsilon = 1e-9);

    assert_relative_eq!(variance_ess(&weights, 0.5), n as f64 / 2.0, epsilon = 1e-9);
    assert_relative_eq!(supremum_ess(&weights, 0.5), n as f64 / 2.0, epsilon = 1e-9);
}

/// A single dominant weight collapses both measures toward 1.
#[test]
fn test_ess_degenerate_weights() {
    let mut weights = vec![0.0; 50];
    weights[7] = 1.0;

    assert_relative_eq!(variance_ess(&weights, 1.0), 1.0, epsilon = 1e-12);
    assert_relative_eq!(supremum_ess(&weights, 1.0), 1.0, epsilon = 1e-12);
}

/// The variance ESS never exceeds the supremum bound's scale.
#[test]
fn test_ess_ordering() {
    // Skewed but normalized weights.
    let mut weights: Vec<f64> = (1..=20).map(|i| i as f64).collect();
    let sum: f64 = weights.iter().sum();
    for w in weights.iter_mut() {
        *w /= sum;
    }

    let var = variance_ess(&weights, 1.0);
    let sup = supremum_ess(&weights, 1.0);
    assert!(var > 1.0 && var < 20.0);
    assert!(sup > 1.0 && sup < 20.0);
}
