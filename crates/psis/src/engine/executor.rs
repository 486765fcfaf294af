//! Execution engine for Pareto-smoothed importance sampling.
//!
//! ## Purpose
//!
//! This module provides the orchestration layer that turns validated
//! log-ratio arrays into smoothed, normalized importance weights together
//! with per-point diagnostics. It coordinates validation, the per-point tail
//! pass, normalization, and effective-sample-size evaluation.
//!
//! ## Design notes
//!
//! * **Pass injection**: The per-point tail pass is a plain function pointer
//!   (`TailPassFn`); a parallel implementation can replace the sequential
//!   default without this crate depending on any threading runtime.
//! * **Flat layout**: Draws for one data point are stored contiguously
//!   (row-major, `n_draw * n_chain` values per point), so each pass works on
//!   an independent `&mut [T]` row.
//! * **Non-fatal degradation**: An infinite tail maximum yields
//!   `pareto_k = +inf` for that point; execution continues.
//!
//! ## Key concepts
//!
//! * **Relative efficiency**: Per-point MCMC efficiency `r_eff`, either
//!   supplied by the caller, derived via an injected estimator, or defaulted
//!   to 1 (independent draws).
//! * **Normalization**: After smoothing, each row is rescaled to sum to one.
//!
//! ## Invariants
//!
//! * Each normalized weight row sums to 1 (up to floating-point error).
//! * All weights are non-negative.
//! * Smoothing never reorders draws; only tail values are replaced in place.
//!
//! ## Non-goals
//!
//! * This module does not validate user input beyond delegating to the
//!   validator.
//! * This module does not compute cross-validation estimates (see the
//!   evaluation layer).

// External dependencies
use ndarray::{Array1, Array3};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::tail::{default_tail_length, smooth_ratio_row};
use crate::engine::output::PsisResult;
use crate::engine::validator::Validator;
use crate::evaluation::ess::{supremum_ess, variance_ess};
use crate::math::gpd::DEFAULT_MIN_GRID_PTS;
use crate::primitives::buffer::TailBuffer;
use crate::primitives::errors::PsisError;

// ============================================================================
// Sample source
// ============================================================================

/// Origin of the posterior draws feeding the importance ratios.
///
/// The source controls how relative efficiencies default when the caller
/// does not supply them: MCMC draws may carry an autocorrelation estimator,
/// while variational or otherwise independent draws use `r_eff = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleSource {
    /// Markov chain Monte Carlo draws (possibly autocorrelated).
    #[default]
    Mcmc,
    /// Variational inference draws (independent by construction).
    Vi,
    /// Any other source of independent draws.
    Other,
}

// ============================================================================
// Tail pass hooks
// ============================================================================

/// Per-point diagnostics produced by one tail pass over all data points.
#[derive(Debug, Clone)]
pub struct TailPassOutput<T> {
    /// Fitted GPD shape parameter for each data point.
    pub pareto_k: Vec<T>,
    /// Tail length used for each data point.
    pub tail_len: Vec<usize>,
}

/// Function pointer type for the per-point tail pass.
///
/// Arguments: flat row-major ratio storage, row length (`n_draw * n_chain`),
/// per-point relative efficiencies, minimum GPD grid size, and whether the
/// weakly-informative shape prior is applied.
///
/// On entry each row holds raw log-ratios; on success each row holds
/// smoothed ratios scaled so its maximum raw ratio maps to 1.
pub type TailPassFn<T> =
    fn(&mut [T], usize, &[T], usize, bool) -> Result<TailPassOutput<T>, PsisError>;

/// Optional per-point relative-efficiency estimator for MCMC sources.
pub type RelativeEffFn<T> = fn(&Array3<T>) -> Vec<T>;

// ============================================================================
// Configuration
// ============================================================================

/// Runtime configuration consumed by the executor.
///
/// Built by the adapter layer from builder parameters; not constructed
/// directly by end users.
#[derive(Debug, Clone)]
pub struct PsisConfig<T: Float> {
    /// Per-point relative efficiencies; `None` means derive or default.
    pub r_eff: Option<Vec<T>>,
    /// Origin of the posterior draws.
    pub source: SampleSource,
    /// Whether to compute effective-sample-size diagnostics.
    pub calc_ess: bool,
    /// Minimum number of grid points for the GPD profile fit.
    pub min_grid_pts: usize,
    /// Whether the weakly-informative shape prior is applied.
    pub prior_shrinkage: bool,
    /// Optional autocorrelation-aware `r_eff` estimator for MCMC draws.
    pub relative_eff_fn: Option<RelativeEffFn<T>>,
    /// Replacement tail pass; `None` selects the sequential default.
    pub tail_pass: Option<TailPassFn<T>>,
}

impl<T: Float> Default for PsisConfig<T> {
    fn default() -> Self {
        Self {
            r_eff: None,
            source: SampleSource::default(),
            calc_ess: true,
            min_grid_pts: DEFAULT_MIN_GRID_PTS,
            prior_shrinkage: true,
            relative_eff_fn: None,
            tail_pass: None,
        }
    }
}

// ============================================================================
// Sequential tail pass
// ============================================================================

/// Default sequential tail pass.
///
/// For each row: exponentiate relative to the row maximum, pick the default
/// tail length for the row's `r_eff`, and smooth the tail in place. Scratch
/// buffers are reused across rows.
pub fn tail_pass_sequential<T: Float>(
    rows: &mut [T],
    sample_size: usize,
    r_eff: &[T],
    min_grid_pts: usize,
    wip: bool,
) -> Result<TailPassOutput<T>, PsisError> {
    let n_data = rows.len() / sample_size;
    let mut buf = TailBuffer::with_capacity(sample_size);
    let mut pareto_k = Vec::with_capacity(n_data);
    let mut tail_len = Vec::with_capacity(n_data);

    for (i, row) in rows.chunks_exact_mut(sample_size).enumerate() {
        let max = row.iter().copied().fold(T::neg_infinity(), T::max);
        for v in row.iter_mut() {
            *v = (*v - max).exp();
        }
        let m = default_tail_length(sample_size, r_eff[i]);
        let (k, fitted) = smooth_ratio_row(row, m, r_eff[i], wip, min_grid_pts, &mut buf)?;
        pareto_k.push(k);
        tail_len.push(fitted);
    }

    Ok(TailPassOutput { pareto_k, tail_len })
}

// ============================================================================
// Executor
// ============================================================================

/// Orchestrates the full PSIS computation over a validated log-ratio array.
pub struct PsisExecutor;

impl PsisExecutor {
    /// Run PSIS on a [data, draw, chain] array of log importance ratios.
    pub fn run<T: Float>(
        log_ratios: &Array3<T>,
        config: &PsisConfig<T>,
    ) -> Result<PsisResult<T>, PsisError> {
        Validator::validate_array(log_ratios)?;

        let (n_data, n_draw, n_chain) = log_ratios.dim();
        let sample_size = n_draw * n_chain;

        let r_eff = Self::resolve_r_eff(log_ratios, config, n_data)?;

        // Flatten to row-major storage: one contiguous row per data point.
        let standard = log_ratios.as_standard_layout();
        let mut rows: Vec<T> = standard.iter().copied().collect();

        let pass = config.tail_pass.unwrap_or(tail_pass_sequential::<T>);
        let tail = pass(
            &mut rows,
            sample_size,
            &r_eff,
            config.min_grid_pts,
            config.prior_shrinkage,
        )?;

        // Normalize each row so its weights sum to 1.
        for row in rows.chunks_exact_mut(sample_size) {
            let sum = row.iter().copied().fold(T::zero(), |acc, v| acc + v);
            for v in row.iter_mut() {
                *v = *v / sum;
            }
        }

        let (ess, sup_ess) = if config.calc_ess {
            let mut ess = Vec::with_capacity(n_data);
            let mut sup = Vec::with_capacity(n_data);
            for (i, row) in rows.chunks_exact(sample_size).enumerate() {
                ess.push(variance_ess(row, r_eff[i]));
                sup.push(supremum_ess(row, r_eff[i]));
            }
            (ess, sup)
        } else {
            (vec![T::nan(); n_data], vec![T::nan(); n_data])
        };

        let weights = Array3::from_shape_vec((n_data, n_draw, n_chain), rows)
            .map_err(|e| PsisError::InvalidNumericValue(e.to_string()))?;

        Ok(PsisResult {
            weights,
            pareto_k: Array1::from_vec(tail.pareto_k),
            ess: Array1::from_vec(ess),
            sup_ess: Array1::from_vec(sup_ess),
            r_eff: Array1::from_vec(r_eff),
            tail_len: Array1::from_vec(tail.tail_len),
            posterior_sample_size: sample_size,
            data_size: n_data,
        })
    }

    /// Resolve per-point relative efficiencies from config and source.
    fn resolve_r_eff<T: Float>(
        log_ratios: &Array3<T>,
        config: &PsisConfig<T>,
        n_data: usize,
    ) -> Result<Vec<T>, PsisError> {
        if let Some(r) = &config.r_eff {
            Validator::validate_r_eff(r, n_data)?;
            return Ok(r.clone());
        }

        if config.source == SampleSource::Mcmc {
            if let Some(estimate) = config.relative_eff_fn {
                let r = estimate(log_ratios);
                Validator::validate_r_eff(&r, n_data)?;
                return Ok(r);
            }
        }

        Ok(vec![T::one(); n_data])
    }
}
