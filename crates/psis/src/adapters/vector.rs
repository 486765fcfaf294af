//! Vector adapter for smoothing a single data point's log ratios.
//!
//! ## Purpose
//!
//! This module smooths one ratio vector at a time, working entirely in the
//! log domain. It is the entry point for callers who manage their own
//! per-point loop or who only need smoothed log weights for one quantity.
//!
//! ## Design notes
//!
//! * **Log domain**: Input and output are log ratios; the raw-ratio
//!   procedure runs on values exponentiated relative to the vector maximum
//!   and results are mapped back with `ln(v) + max`.
//! * **Infinity tolerated**: Unlike the array forms, infinite entries are
//!   accepted here; an infinite tail yields `pareto_k = +inf` with the
//!   vector returned unsmoothed and unnormalized.
//! * **Normalization**: When smoothing succeeds, the returned log weights
//!   are shifted so their exponentials sum to 1.
//!
//! ## Key concepts
//!
//! * **Tail length override**: Callers may pin the tail length instead of
//!   using the `r_eff`-dependent default.
//!
//! ## Invariants
//!
//! * NaN input is rejected; infinities are not.
//! * `tail_len >= 5` whenever smoothing ran.
//!
//! ## Non-goals
//!
//! * This adapter does not compute ESS or LOO estimates; those operate on
//!   the multi-point forms.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::tail::{default_tail_length, smooth_log_row};
use crate::engine::validator::Validator;
use crate::math::gpd::DEFAULT_MIN_GRID_PTS;
use crate::math::stable::log_sum_exp;
use crate::primitives::buffer::TailBuffer;
use crate::primitives::errors::PsisError;

// ============================================================================
// Smoothed vector output
// ============================================================================

/// Result of smoothing a single log-ratio vector.
#[derive(Debug, Clone)]
pub struct SmoothedVector<T> {
    /// Smoothed log weights, normalized so their exponentials sum to 1
    /// (left as the input log ratios when `pareto_k` is infinite).
    pub log_weights: Vec<T>,
    /// Fitted GPD shape parameter.
    pub pareto_k: T,
    /// Tail length used.
    pub tail_len: usize,
}

// ============================================================================
// Vector PSIS Builder
// ============================================================================

/// Builder for the single-vector processor.
#[derive(Debug, Clone)]
pub struct VectorPsisBuilder<T: Float> {
    /// Relative efficiency of the draws behind this vector.
    pub r_eff: Option<T>,

    /// Explicit tail length, overriding the default.
    pub tail_length: Option<usize>,

    /// Minimum grid points for the GPD profile fit.
    pub min_grid_pts: usize,

    /// Whether the weakly-informative shape prior is applied.
    pub prior_shrinkage: bool,

    /// Deferred error from adapter conversion.
    pub deferred_error: Option<PsisError>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for VectorPsisBuilder<T> {
    fn default() -> Self {
        Self {
            r_eff: None,
            tail_length: None,
            min_grid_pts: DEFAULT_MIN_GRID_PTS,
            prior_shrinkage: true,
            deferred_error: None,
            duplicate_param: None,
        }
    }
}

impl<T: Float> VectorPsisBuilder<T> {
    /// Set the relative efficiency for this vector's draws.
    pub fn r_eff(mut self, r_eff: T) -> Self {
        self.r_eff = Some(r_eff);
        self
    }

    /// Pin the tail length instead of deriving it from `r_eff`.
    pub fn tail_length(mut self, tail_len: usize) -> Self {
        self.tail_length = Some(tail_len);
        self
    }

    /// Build the vector processor.
    pub fn build(self) -> Result<VectorPsis<T>, PsisError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        Validator::validate_no_duplicates(self.duplicate_param)?;

        if let Some(r) = self.r_eff {
            Validator::validate_r_eff(&[r], 1)?;
        }

        Ok(VectorPsis { config: self })
    }
}

// ============================================================================
// Vector PSIS Processor
// ============================================================================

/// Single-vector PSIS processor.
pub struct VectorPsis<T: Float> {
    config: VectorPsisBuilder<T>,
}

impl<T: Float + Debug> VectorPsis<T> {
    /// Smooth one vector of log importance ratios.
    pub fn smooth(self, log_ratios: &[T]) -> Result<SmoothedVector<T>, PsisError> {
        Validator::validate_vector(log_ratios)?;

        let n = log_ratios.len();
        let r_eff = self.config.r_eff.unwrap_or_else(T::one);
        let tail_len = self
            .config
            .tail_length
            .unwrap_or_else(|| default_tail_length(n, r_eff));

        let mut log_weights = log_ratios.to_vec();
        let mut buf = TailBuffer::with_capacity(n);

        let (pareto_k, tail_len) = smooth_log_row(
            &mut log_weights,
            tail_len,
            r_eff,
            self.config.prior_shrinkage,
            self.config.min_grid_pts,
            &mut buf,
        )?;

        if pareto_k.is_finite() {
            let norm = log_sum_exp(&log_weights);
            for v in log_weights.iter_mut() {
                *v = *v - norm;
            }
        }

        Ok(SmoothedVector {
            log_weights,
            pareto_k,
            tail_len,
        })
    }
}
