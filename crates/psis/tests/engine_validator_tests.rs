#![cfg(feature = "dev")]
//! Tests for input validation.
//!
//! These tests verify fail-fast validation of the engine's inputs:
//! - Array emptiness and finiteness
//! - Relative-efficiency length and range checks
//! - Chain-index coverage, numbering, and balance
//! - Vector NaN rejection with infinity tolerance
//! - Builder duplicate-parameter detection
//!
//! ## Test Organization
//!
//! 1. **Array Validation** - The 3-D entry contract
//! 2. **Parameter Validation** - r_eff and chain indices
//! 3. **Vector Validation** - The log-domain entry contract

use ndarray::Array3;

use psis::internals::engine::validator::Validator;
use psis::internals::primitives::errors::PsisError;

// ============================================================================
// Array Validation Tests
// ============================================================================

/// Empty axes are rejected.
#[test]
fn test_empty_array_rejected() {
    for dim in [(0, 10, 2), (5, 0, 2), (5, 10, 0)] {
        let arr = Array3::<f64>::from_elem(dim, 0.0);
        assert_eq!(Validator::validate_array(&arr), Err(PsisError::EmptyInput));
    }
}

/// NaN and infinities anywhere in the array are rejected with context.
#[test]
fn test_non_finite_array_rejected() {
    let mut arr = Array3::from_elem((2, 4, 2), 1.0);
    arr[[1, 2, 0]] = f64::NAN;

    match Validator::validate_array(&arr) {
        Err(PsisError::InvalidNumericValue(msg)) => {
            assert!(msg.contains("[1,2,0]"), "context missing: {msg}");
        }
        other => panic!("expected InvalidNumericValue, got {other:?}"),
    }

    let mut arr = Array3::from_elem((2, 4, 2), 1.0);
    arr[[0, 0, 1]] = f64::INFINITY;
    assert!(Validator::validate_array(&arr).is_err());
}

/// A well-formed array passes.
#[test]
fn test_finite_array_accepted() {
    let arr = Array3::from_shape_fn((3, 5, 2), |(i, d, c)| (i + d + c) as f64 * 0.1);
    assert_eq!(Validator::validate_array(&arr), Ok(()));
}

// ============================================================================
// Parameter Validation Tests
// ============================================================================

/// The r_eff vector must have one entry per data point.
#[test]
fn test_r_eff_length_mismatch() {
    assert_eq!(
        Validator::validate_r_eff(&[1.0, 1.0], 3),
        Err(PsisError::REffLengthMismatch {
            got: 2,
            expected: 3,
        })
    );
}

/// r_eff entries must be positive and finite.
#[test]
fn test_r_eff_range() {
    assert!(Validator::validate_r_eff(&[1.0, 0.5, 0.01], 3).is_ok());

    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = Validator::validate_r_eff(&[1.0, bad], 2).unwrap_err();
        assert!(matches!(err, PsisError::InvalidREff(_)), "accepted {bad}");
    }
}

/// The chain index must cover every column.
#[test]
fn test_chain_index_length() {
    let err = Validator::validate_chain_index(&[1, 1, 2], 4).unwrap_err();
    assert!(matches!(err, PsisError::InvalidChainIndex(_)));
}

/// Chains are numbered contiguously from 1.
#[test]
fn test_chain_index_numbering() {
    // Zero-based numbering.
    assert!(Validator::validate_chain_index(&[0, 0, 1, 1], 4).is_err());
    // Gap: chain 2 missing.
    assert!(Validator::validate_chain_index(&[1, 1, 3, 3], 4).is_err());
}

/// Chains must have equal lengths.
#[test]
fn test_chain_index_balance() {
    assert!(Validator::validate_chain_index(&[1, 1, 1, 2], 4).is_err());
    assert!(Validator::validate_chain_index(&[1, 1, 2, 2], 4).is_ok());
    // Interleaved assignment is fine as long as counts match.
    assert!(Validator::validate_chain_index(&[1, 2, 1, 2, 1, 2], 6).is_ok());
}

/// Duplicate builder parameters are rejected by name.
#[test]
fn test_duplicate_parameter() {
    assert_eq!(Validator::validate_no_duplicates(None), Ok(()));
    assert_eq!(
        Validator::validate_no_duplicates(Some("calc_ess")),
        Err(PsisError::DuplicateParameter {
            parameter: "calc_ess",
        })
    );
}

// ============================================================================
// Vector Validation Tests
// ============================================================================

/// The vector form rejects emptiness and NaN but tolerates infinities.
#[test]
fn test_vector_validation() {
    assert_eq!(
        Validator::validate_vector::<f64>(&[]),
        Err(PsisError::EmptyInput)
    );

    let err = Validator::validate_vector(&[1.0, f64::NAN]).unwrap_err();
    assert!(matches!(err, PsisError::InvalidNumericValue(_)));

    // Infinite ratios are the per-point degradation path, not an input error.
    assert_eq!(
        Validator::validate_vector(&[1.0, f64::INFINITY, -1.0]),
        Ok(())
    );
}
