//! Output structures for PSIS and PSIS-LOO results.
//!
//! ## Purpose
//!
//! This module defines the result types returned by the engine and the
//! cross-validation estimators: smoothed weights with per-point
//! diagnostics, and leave-one-out summaries built on top of them.
//!
//! ## Design notes
//!
//! * **Shape symmetry**: The weight array mirrors the input layout
//!   [data_point, draw, chain], so callers index results the same way they
//!   indexed their log-ratios.
//! * **Diagnostics on demand**: Shape-parameter classification is computed
//!   from stored `pareto_k` values when asked, not cached.
//!
//! ## Invariants
//!
//! * `weights.dim().0 == data_size` and
//!   `weights.dim().1 * weights.dim().2 == posterior_sample_size`.
//! * All per-point vectors (`pareto_k`, `ess`, `sup_ess`, `r_eff`,
//!   `tail_len`) have length `data_size`.
//!
//! ## Non-goals
//!
//! * This module does not compute results; it only holds them.

// External dependencies
use ndarray::{Array1, Array3};
use num_traits::Float;

// Internal dependencies
use crate::evaluation::cv::{LooPointwise, LooSummary, SummaryRow};
use crate::evaluation::diagnostics::{DiagnosticCounts, ShapeStatus};

// ============================================================================
// PSIS result
// ============================================================================

/// Smoothed importance weights and per-point diagnostics.
#[derive(Debug, Clone)]
pub struct PsisResult<T: Float> {
    /// Normalized smoothed weights, shape [data_point, draw, chain].
    ///
    /// Each data point's weights sum to 1 across all draws and chains.
    pub weights: Array3<T>,
    /// Fitted GPD shape parameter per data point (`+inf` marks a point
    /// whose tail contained an infinite ratio).
    pub pareto_k: Array1<T>,
    /// Variance-based effective sample size per data point (NaN when ESS
    /// computation was disabled).
    pub ess: Array1<T>,
    /// Supremum-based effective sample size per data point (NaN when ESS
    /// computation was disabled).
    pub sup_ess: Array1<T>,
    /// Relative efficiency used for each data point.
    pub r_eff: Array1<T>,
    /// Tail length used for each data point.
    pub tail_len: Array1<usize>,
    /// Total draws per data point (`n_draw * n_chain`).
    pub posterior_sample_size: usize,
    /// Number of data points.
    pub data_size: usize,
}

impl<T: Float> PsisResult<T> {
    /// Classify one data point's shape parameter.
    pub fn k_status(&self, i: usize) -> ShapeStatus {
        ShapeStatus::classify(self.pareto_k[i])
    }

    /// Indices of data points whose shape parameter exceeds `threshold`.
    pub fn flagged_points(&self, threshold: T) -> Vec<usize> {
        self.pareto_k
            .iter()
            .enumerate()
            .filter(|(_, &k)| k > threshold)
            .map(|(i, _)| i)
            .collect()
    }

    /// Tally data points per diagnostic tier.
    pub fn diagnostic_counts(&self) -> DiagnosticCounts {
        DiagnosticCounts::tally(self.pareto_k.iter().copied())
    }
}

// ============================================================================
// PSIS-LOO result
// ============================================================================

/// Leave-one-out cross-validation estimates on top of a PSIS run.
#[derive(Debug, Clone)]
pub struct PsisLooResult<T: Float> {
    /// Summary rows: LOO estimate, naive estimate, and overfit penalty.
    pub summary: LooSummary<T>,
    /// Per-data-point estimates and diagnostics.
    pub pointwise: LooPointwise<T>,
    /// The underlying PSIS run (weights and shape diagnostics).
    pub psis: PsisResult<T>,
}

impl<T: Float> PsisLooResult<T> {
    /// Expected log pointwise predictive density, LOO estimate.
    pub fn elpd(&self) -> T {
        self.summary.loo_est.total
    }

    /// Standard error of the LOO estimate.
    pub fn se_elpd(&self) -> T {
        self.summary.loo_est.se_total
    }

    /// Effective number of parameters (alias for the overfit penalty row).
    pub fn p_eff(&self) -> &SummaryRow<T> {
        self.summary.p_eff()
    }
}
