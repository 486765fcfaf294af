//! Error types for PSIS operations.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur during Pareto-smoothed
//! importance sampling and LOO-CV aggregation, including input validation,
//! chain layout problems, and degenerate tails.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Deferred**: Builder misconfiguration is caught and reported at `build()`.
//! * **Fatal vs. local**: Everything in this enum is fatal to the whole call.
//!   The only graceful per-point degradation — an infinite tail value — is not
//!   an error at all: it yields `pareto_k = +inf` for that data point.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty arrays, non-finite values, length mismatches.
//! 2. **Chain layout**: Malformed chain-index vectors for the matrix entry form.
//! 3. **Degenerate tails**: Tails too short or constant for a GPD fit.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Error messages name likely causes (bad inputs, insufficient samples).
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or retry strategies.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use std::error::Error;

// ============================================================================
// Degenerate Tail Reasons
// ============================================================================

/// Why a tail could not be smoothed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailReason {
    /// Fewer than the minimum number of tail elements.
    TooShort,
    /// All tail values numerically identical; the GPD fit is undefined.
    Constant,
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for PSIS operations.
#[derive(Debug, Clone, PartialEq)]
pub enum PsisError {
    /// Input array is empty along at least one axis.
    EmptyInput,

    /// Input data contains NaN (or, for validated entry forms, infinite) values.
    InvalidNumericValue(String),

    /// Relative efficiency vector does not match the number of data points.
    REffLengthMismatch {
        /// Number of entries provided.
        got: usize,
        /// Number of data points in the input array.
        expected: usize,
    },

    /// A relative efficiency entry must be positive and finite.
    InvalidREff(f64),

    /// Chain-index vector is malformed (uncovered columns, non-contiguous
    /// numbering, or unequal chain lengths).
    InvalidChainIndex(String),

    /// A data point's tail cannot support a generalized Pareto fit.
    DegenerateTail {
        /// Length of the offending tail.
        tail_len: usize,
        /// What ruled the tail out.
        reason: TailReason,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for PsisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input array is empty"),
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::REffLengthMismatch { got, expected } => {
                write!(
                    f,
                    "Relative efficiency length mismatch: got {got} entries, expected {expected} (one per data point)"
                )
            }
            Self::InvalidREff(r) => {
                write!(f, "Invalid relative efficiency: {r} (must be positive and finite)")
            }
            Self::InvalidChainIndex(s) => write!(f, "Invalid chain index: {s}"),
            Self::DegenerateTail { tail_len, reason } => match reason {
                TailReason::TooShort => write!(
                    f,
                    "Degenerate tail: {tail_len} elements (need at least 5; too few posterior draws for this data point)"
                ),
                TailReason::Constant => write!(
                    f,
                    "Degenerate tail: all {tail_len} tail values are numerically identical, so the generalized Pareto fit is undefined"
                ),
            },
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for PsisError {}
