//! Pareto-k diagnostics for importance-sampling reliability.
//!
//! ## Purpose
//!
//! This module classifies fitted generalized Pareto shapes (`pareto_k`) into
//! severity tiers and tallies them across data points, so callers can judge
//! whether the smoothed estimates are trustworthy.
//!
//! ## Design notes
//!
//! * **Advisory only**: Classification never blocks or alters computed
//!   values; it is returned as data for an external reporting layer.
//! * **Closed tiers**: The thresholds follow Vehtari, Gelman & Gabry (2024):
//!   0.5, 0.7, and 1.
//!
//! ## Invariants
//!
//! * Every finite or infinite shape maps to exactly one tier.
//! * Counts sum to the number of data points.
//!
//! ## Non-goals
//!
//! * This module does not render tables or print warnings.
//! * This module does not recompute or adjust weights.

// External dependencies
use num_traits::Float;

// ============================================================================
// Thresholds
// ============================================================================

/// Shapes below this are acceptable.
pub const K_ACCEPTABLE: f64 = 0.5;

/// Shapes in `[0.5, 0.7)` suggest slow convergence of the estimate.
pub const K_INFORMATIONAL: f64 = 0.7;

/// Shapes at or above 1 make the importance-sampling estimate unusable.
pub const K_SEVERE: f64 = 1.0;

// ============================================================================
// Classification
// ============================================================================

/// Severity tier of a fitted Pareto shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeStatus {
    /// `k < 0.5`: the importance-sampling estimate is reliable.
    Acceptable,
    /// `0.5 <= k < 0.7`: usable, but convergence may be slow.
    Informational,
    /// `0.7 <= k < 1`: PSIS has likely failed for this point.
    High,
    /// `k >= 1`: the estimate is unusable.
    Severe,
}

impl ShapeStatus {
    /// Classify a fitted shape parameter.
    pub fn classify<T: Float>(k: T) -> Self {
        if k >= T::from(K_SEVERE).unwrap() {
            Self::Severe
        } else if k >= T::from(K_INFORMATIONAL).unwrap() {
            Self::High
        } else if k >= T::from(K_ACCEPTABLE).unwrap() {
            Self::Informational
        } else {
            Self::Acceptable
        }
    }

    /// One-line interpretation, returned as data for external reporting.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Acceptable => "all Pareto k estimates are good",
            Self::Informational => "some Pareto k estimates indicate slow convergence",
            Self::High => "Pareto k estimates indicate PSIS likely failed",
            Self::Severe => "Pareto k estimates make the result unusable",
        }
    }
}

// ============================================================================
// Tally
// ============================================================================

/// Counts of data points per severity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounts {
    /// Points with `k < 0.5`.
    pub acceptable: usize,
    /// Points with `0.5 <= k < 0.7`.
    pub informational: usize,
    /// Points with `0.7 <= k < 1`.
    pub high: usize,
    /// Points with `k >= 1`.
    pub severe: usize,
}

impl DiagnosticCounts {
    /// Tally the severity tiers of a set of fitted shapes.
    pub fn tally<T: Float>(pareto_k: impl IntoIterator<Item = T>) -> Self {
        let mut counts = Self::default();
        for k in pareto_k {
            match ShapeStatus::classify(k) {
                ShapeStatus::Acceptable => counts.acceptable += 1,
                ShapeStatus::Informational => counts.informational += 1,
                ShapeStatus::High => counts.high += 1,
                ShapeStatus::Severe => counts.severe += 1,
            }
        }
        counts
    }

    /// Total number of classified points.
    pub fn total(&self) -> usize {
        self.acceptable + self.informational + self.high + self.severe
    }

    /// Whether any point fell outside the acceptable tier.
    pub fn any_flagged(&self) -> bool {
        self.informational + self.high + self.severe > 0
    }
}
