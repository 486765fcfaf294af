//! Leave-one-out cross-validation aggregation over smoothed weights.
//!
//! ## Purpose
//!
//! This module turns normalized PSIS weights and the matching log-likelihood
//! array into pointwise leave-one-out estimates and a summary table with
//! standard errors. It also defines the closed registry of cross-validation
//! methods the crate supports.
//!
//! ## Design notes
//!
//! * **Closed method registry**: [`CvMethod`] is a compile-time-enumerated
//!   enum dispatched by exhaustive match. New methods are new variants, not
//!   runtime lookups.
//! * **Log-domain throughout**: Pointwise expectations are log-sum-exp
//!   reductions over `ln(w) + loglik`; likelihoods are never materialized in
//!   probability space.
//! * **Two names, one quantity**: `overfit` (summary view) and `p_eff`
//!   (effective number of parameters) are the same column; both accessors
//!   resolve to it.
//!
//! ## Key concepts
//!
//! * **loo_est**: log of the weighted predictive density with the point held
//!   out — the weights already sum to 1, so this is a safe weighted log-sum.
//! * **naive_est**: in-sample log predictive density, `LSE(loglik) - ln(S)`.
//! * **mcse**: Monte Carlo standard error of `loo_est`, adjusted by the
//!   point's relative efficiency.
//!
//! ## Invariants
//!
//! * `total == mean * data_size` and `se_total == se_mean * data_size`
//!   exactly (identities, not approximations).
//! * Pointwise and summary views are computed from the same buffers in one
//!   pass over the data.
//!
//! ## Non-goals
//!
//! * This module does not run PSIS (engine's job) and does not negate the
//!   log-likelihood (adapter's job).
//! * This module does not render tables.

// External dependencies
use ndarray::Array1;
use num_traits::Float;

// Internal dependencies
use crate::math::stable::log_sum_exp;

// ============================================================================
// Method Registry
// ============================================================================

/// Cross-validation methods supported by the crate.
///
/// A closed enum: dispatch is an exhaustive match, and future schemes
/// (k-fold, moment matching) become new variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CvMethod {
    /// Leave-one-out via Pareto-smoothed importance sampling.
    #[default]
    Loo,
}

impl CvMethod {
    /// Stable method name for reporting layers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loo => "psis_loo",
        }
    }
}

// ============================================================================
// Tables
// ============================================================================

/// One summary row: a statistic aggregated over data points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRow<T> {
    /// `mean * data_size`.
    pub total: T,
    /// `se_mean * data_size`.
    pub se_total: T,
    /// Average of the pointwise values.
    pub mean: T,
    /// Sample standard deviation over points divided by `sqrt(data_size)`.
    pub se_mean: T,
}

/// Summary table: one row per LOO statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LooSummary<T> {
    /// Leave-one-out expected log predictive density.
    pub loo_est: SummaryRow<T>,
    /// In-sample (naive) log predictive density.
    pub naive_est: SummaryRow<T>,
    /// Overfit penalty: `naive_est - loo_est`.
    pub overfit: SummaryRow<T>,
}

impl<T> LooSummary<T> {
    /// Effective number of parameters — the same row as `overfit`.
    pub fn p_eff(&self) -> &SummaryRow<T> {
        &self.overfit
    }
}

/// Pointwise table: one entry per data point in each column.
#[derive(Debug, Clone, PartialEq)]
pub struct LooPointwise<T> {
    /// Leave-one-out log predictive density per point.
    pub loo_est: Array1<T>,
    /// In-sample log predictive density per point.
    pub naive_est: Array1<T>,
    /// Overfit penalty per point.
    pub overfit: Array1<T>,
    /// Monte Carlo standard error of `loo_est` per point.
    pub mcse: Array1<T>,
    /// Fitted Pareto shape per point.
    pub pareto_k: Array1<T>,
}

impl<T> LooPointwise<T> {
    /// Effective number of parameters — the same column as `overfit`.
    pub fn p_eff(&self) -> &Array1<T> {
        &self.overfit
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Aggregate normalized weights and log-likelihoods into LOO tables.
///
/// `log_lik` and `weights` are flat row-major buffers of `r_eff.len()` rows
/// by `sample_size` columns; weight rows must already sum to 1.
pub fn aggregate<T: Float>(
    log_lik: &[T],
    weights: &[T],
    sample_size: usize,
    r_eff: &[T],
    pareto_k: &[T],
) -> (LooPointwise<T>, LooSummary<T>) {
    let n_data = r_eff.len();
    let ln_s = T::from(sample_size).unwrap().ln();

    let mut loo_est = Vec::with_capacity(n_data);
    let mut naive_est = Vec::with_capacity(n_data);
    let mut overfit = Vec::with_capacity(n_data);
    let mut mcse = Vec::with_capacity(n_data);

    for i in 0..n_data {
        let ll = &log_lik[i * sample_size..(i + 1) * sample_size];
        let w = &weights[i * sample_size..(i + 1) * sample_size];

        let loo = weighted_log_mean(ll, w);
        let naive = log_sum_exp(ll) - ln_s;

        // MC error of the weighted expectation, autocorrelation-adjusted.
        let var = ll
            .iter()
            .zip(w.iter())
            .fold(T::zero(), |acc, (&l, &wi)| {
                let d = l - loo;
                acc + wi * d * d
            });
        let se = var.sqrt() / r_eff[i].sqrt();

        loo_est.push(loo);
        naive_est.push(naive);
        overfit.push(naive - loo);
        mcse.push(se);
    }

    let summary = LooSummary {
        loo_est: summarize(&loo_est),
        naive_est: summarize(&naive_est),
        overfit: summarize(&overfit),
    };

    let pointwise = LooPointwise {
        loo_est: Array1::from_vec(loo_est),
        naive_est: Array1::from_vec(naive_est),
        overfit: Array1::from_vec(overfit),
        mcse: Array1::from_vec(mcse),
        pareto_k: Array1::from_vec(pareto_k.to_vec()),
    };

    (pointwise, summary)
}

/// `ln(sum(w * exp(ll)))` computed as a log-sum-exp over `ln(w) + ll`.
fn weighted_log_mean<T: Float>(log_lik: &[T], weights: &[T]) -> T {
    let max = log_lik
        .iter()
        .zip(weights.iter())
        .map(|(&l, &w)| w.ln() + l)
        .fold(T::neg_infinity(), |a, v| if v > a { v } else { a });

    if !max.is_finite() {
        return max;
    }

    let sum = log_lik
        .iter()
        .zip(weights.iter())
        .fold(T::zero(), |acc, (&l, &w)| acc + (w.ln() + l - max).exp());

    max + sum.ln()
}

/// Mean, standard-error, and total scalars for one pointwise column.
fn summarize<T: Float>(values: &[T]) -> SummaryRow<T> {
    let n = values.len();
    let n_t = T::from(n).unwrap();

    let mean = values.iter().fold(T::zero(), |a, &v| a + v) / n_t;

    let se_mean = if n > 1 {
        let var = values.iter().fold(T::zero(), |a, &v| {
            let d = v - mean;
            a + d * d
        }) / (n_t - T::one());
        (var / n_t).sqrt()
    } else {
        T::zero()
    };

    SummaryRow {
        total: mean * n_t,
        se_total: se_mean * n_t,
        mean,
        se_mean,
    }
}
