//! Array adapter for the 3-D [data, draw, chain] entry form.
//!
//! ## Purpose
//!
//! This module provides the primary execution adapter for PSIS. It accepts
//! log importance ratios (or log-likelihoods for LOO estimation) as a 3-D
//! array indexed [data_point, draw, chain] and delegates to the execution
//! engine.
//!
//! ## Design notes
//!
//! * **Delegation**: All numeric work happens in the engine; this adapter
//!   only assembles configuration and reshapes results.
//! * **LOO entry**: `estimate` negates the log-likelihoods to form the
//!   importance ratios, smooths them, and aggregates pointwise estimates.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Builder Pattern**: Fluent API for configuration with sensible
//!   defaults.
//! * **Method registry**: Cross-validation flavors are a closed enum,
//!   dispatched exhaustively at compile time.
//!
//! ## Invariants
//!
//! * Input arrays must be non-empty with every value finite.
//! * Output weight layout matches the input layout.
//!
//! ## Non-goals
//!
//! * This adapter does not accept 2-D matrices (use the matrix adapter).
//! * This adapter does not smooth a single ratio vector (use the vector
//!   adapter).

// External dependencies
use core::fmt::Debug;
use ndarray::Array3;
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{PsisConfig, PsisExecutor, RelativeEffFn, TailPassFn};
use crate::engine::executor::SampleSource;
use crate::engine::output::{PsisLooResult, PsisResult};
use crate::engine::validator::Validator;
use crate::evaluation::cv::{aggregate, CvMethod};
use crate::math::gpd::DEFAULT_MIN_GRID_PTS;
use crate::primitives::errors::PsisError;

// ============================================================================
// Array PSIS Builder
// ============================================================================

/// Builder for the 3-D array processor.
#[derive(Debug, Clone)]
pub struct ArrayPsisBuilder<T: Float> {
    /// Per-point relative efficiencies.
    pub r_eff: Option<Vec<T>>,

    /// Origin of the posterior draws.
    pub source: SampleSource,

    /// Whether to compute effective-sample-size diagnostics.
    pub calc_ess: bool,

    /// Minimum grid points for the GPD profile fit.
    pub min_grid_pts: usize,

    /// Whether the weakly-informative shape prior is applied.
    pub prior_shrinkage: bool,

    /// Cross-validation method for `estimate`.
    pub cv_method: Option<CvMethod>,

    /// Deferred error from adapter conversion.
    pub deferred_error: Option<PsisError>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom tail pass function.
    #[doc(hidden)]
    pub custom_tail_pass: Option<TailPassFn<T>>,

    /// Relative-efficiency estimator for MCMC sources.
    #[doc(hidden)]
    pub relative_eff_fn: Option<RelativeEffFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for ArrayPsisBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> ArrayPsisBuilder<T> {
    /// Create a new array builder with default parameters.
    fn new() -> Self {
        Self {
            r_eff: None,
            source: SampleSource::default(),
            calc_ess: true,
            min_grid_pts: DEFAULT_MIN_GRID_PTS,
            prior_shrinkage: true,
            cv_method: None,
            deferred_error: None,
            custom_tail_pass: None,
            relative_eff_fn: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set per-point relative efficiencies.
    pub fn r_eff(mut self, r_eff: Vec<T>) -> Self {
        self.r_eff = Some(r_eff);
        self
    }

    /// Set the origin of the posterior draws.
    pub fn source(mut self, source: SampleSource) -> Self {
        self.source = source;
        self
    }

    /// Enable or disable effective-sample-size computation.
    pub fn calc_ess(mut self, enabled: bool) -> Self {
        self.calc_ess = enabled;
        self
    }

    /// Set the cross-validation method used by `estimate`.
    pub fn cv_method(mut self, method: CvMethod) -> Self {
        self.cv_method = Some(method);
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set a custom tail pass function.
    #[doc(hidden)]
    pub fn custom_tail_pass(mut self, pass: TailPassFn<T>) -> Self {
        self.custom_tail_pass = Some(pass);
        self
    }

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the array processor.
    pub fn build(self) -> Result<ArrayPsis<T>, PsisError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Ok(ArrayPsis { config: self })
    }
}

// ============================================================================
// Array PSIS Processor
// ============================================================================

/// 3-D array PSIS processor.
pub struct ArrayPsis<T: Float> {
    config: ArrayPsisBuilder<T>,
}

impl<T: Float + Debug + Send + Sync + 'static> ArrayPsis<T> {
    /// Smooth importance weights from log importance ratios.
    pub fn smooth(self, log_ratios: &Array3<T>) -> Result<PsisResult<T>, PsisError> {
        PsisExecutor::run(log_ratios, &self.engine_config())
    }

    /// Estimate out-of-sample predictive performance from pointwise
    /// log-likelihoods.
    pub fn estimate(self, log_lik: &Array3<T>) -> Result<PsisLooResult<T>, PsisError> {
        let method = self.config.cv_method.unwrap_or_default();
        match method {
            CvMethod::Loo => self.loo(log_lik),
        }
    }

    /// Leave-one-out estimation: PSIS on negated log-likelihoods, then
    /// pointwise aggregation.
    fn loo(self, log_lik: &Array3<T>) -> Result<PsisLooResult<T>, PsisError> {
        let log_ratios = log_lik.mapv(|v| -v);
        let psis = PsisExecutor::run(&log_ratios, &self.engine_config())?;

        // Flatten both arrays to matching row-major order.
        let ll_flat: Vec<T> = log_lik.iter().copied().collect();
        let w_flat: Vec<T> = psis.weights.iter().copied().collect();

        let r_eff = psis.r_eff.to_vec();
        let pareto_k = psis.pareto_k.to_vec();
        let (pointwise, summary) = aggregate(
            &ll_flat,
            &w_flat,
            psis.posterior_sample_size,
            &r_eff,
            &pareto_k,
        );

        Ok(PsisLooResult {
            summary,
            pointwise,
            psis,
        })
    }

    fn engine_config(&self) -> PsisConfig<T> {
        PsisConfig {
            r_eff: self.config.r_eff.clone(),
            source: self.config.source,
            calc_ess: self.config.calc_ess,
            min_grid_pts: self.config.min_grid_pts,
            prior_shrinkage: self.config.prior_shrinkage,
            relative_eff_fn: self.config.relative_eff_fn,
            tail_pass: self.config.custom_tail_pass,
        }
    }
}
