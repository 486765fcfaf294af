//! # PSIS — Pareto-Smoothed Importance Sampling for Rust
//!
//! Fast, robust Pareto-smoothed importance sampling (PSIS) and
//! leave-one-out cross-validation (LOO-CV) for Bayesian models in **Rust**.
//!
//! ## What is PSIS?
//!
//! Importance sampling reweights posterior draws to approximate an
//! expectation under a different distribution, but raw importance ratios
//! often have heavy right tails that make the estimate unstable. PSIS fits
//! a generalized Pareto distribution (GPD) to the largest ratios of each
//! data point and replaces them with the fitted distribution's order
//! statistics. The fitted shape parameter `k` doubles as a diagnostic: it
//! tells you, point by point, whether the importance sampling estimate can
//! be trusted.
//!
//! The main application is PSIS-LOO: estimating out-of-sample predictive
//! performance from pointwise log-likelihoods without refitting the model
//! once per observation.
//!
//! ## Quick Start
//!
//! ### Smoothing importance weights
//!
//! ```rust
//! use psis::prelude::*;
//! use ndarray::Array3;
//!
//! // Log importance ratios, indexed [data_point, draw, chain].
//! let log_ratios = Array3::from_shape_fn((2, 100, 4), |(i, d, c)| {
//!     ((i + 1) as f64 * (d as f64 + 0.5) * (c as f64 + 1.3)).sin() * 0.5
//! });
//!
//! let model = Psis::new().adapter(Array).build()?;
//! let result = model.smooth(&log_ratios)?;
//!
//! assert_eq!(result.weights.dim(), (2, 100, 4));
//! assert_eq!(result.pareto_k.len(), 2);
//! # Result::<(), PsisError>::Ok(())
//! ```
//!
//! ### Estimating LOO-CV predictive performance
//!
//! ```rust
//! use psis::prelude::*;
//! use ndarray::Array3;
//!
//! // Pointwise log-likelihoods, indexed [data_point, draw, chain].
//! let log_lik = Array3::from_shape_fn((3, 200, 2), |(i, d, c)| {
//!     -1.0 - 0.5 * ((d as f64 * 0.37 + c as f64 * 1.1 + i as f64).sin()).powi(2)
//! });
//!
//! let model = Psis::new()
//!     .source(Mcmc)       // draws come from MCMC chains
//!     .cv_method(Loo)     // leave-one-out estimation
//!     .adapter(Array)
//!     .build()?;
//!
//! let loo = model.estimate(&log_lik)?;
//!
//! assert!(loo.elpd().is_finite());
//! assert_eq!(loo.pointwise.loo_est.len(), 3);
//! # Result::<(), PsisError>::Ok(())
//! ```
//!
//! ### Smoothing a single vector
//!
//! ```rust
//! use psis::prelude::*;
//!
//! let log_ratios: Vec<f64> = (0..200).map(|i| (i as f64 * 0.73).sin() * 2.0).collect();
//!
//! let model = Psis::new().adapter(Vector).build()?;
//! let out = model.smooth(&log_ratios)?;
//!
//! assert_eq!(out.log_weights.len(), 200);
//! assert!(out.tail_len >= 5);
//! # Result::<(), PsisError>::Ok(())
//! ```
//!
//! ## Diagnostics
//!
//! Every result carries one fitted shape parameter per data point:
//!
//! - `k < 0.5` — estimate is reliable;
//! - `0.5 <= k < 0.7` — usable, convergence slows;
//! - `0.7 <= k < 1` — estimate is unreliable;
//! - `k >= 1` — the importance ratio variance is infinite.
//!
//! ```rust
//! # use psis::prelude::*;
//! # use ndarray::Array3;
//! # let log_ratios = Array3::from_shape_fn((2, 100, 4), |(i, d, c)| {
//! #     ((i + 1) as f64 * (d as f64 + 0.5) * (c as f64 + 1.3)).sin() * 0.5
//! # });
//! let result = Psis::new().adapter(Array).build()?.smooth(&log_ratios)?;
//!
//! let counts = result.diagnostic_counts();
//! let bad = result.flagged_points(0.7);
//! # let _ = (counts, bad);
//! # Result::<(), PsisError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! Entry points return `Result<_, PsisError>`. All input problems (empty
//! arrays, non-finite values, mismatched `r_eff` lengths, malformed chain
//! indices, tails too short to fit) surface as errors before or during the
//! computation; the single non-fatal degradation is an infinite importance
//! ratio, which marks its data point with `pareto_k = +inf` and leaves that
//! point unsmoothed.
//!
//! ## References
//!
//! - Vehtari, A., Simpson, D., Gelman, A., Yao, Y., Gabry, J. (2024).
//!   "Pareto Smoothed Importance Sampling". JMLR 25(72).
//! - Vehtari, A., Gelman, A., Gabry, J. (2017). "Practical Bayesian model
//!   evaluation using leave-one-out cross-validation and WAIC".
//! - Zhang, J., Stephens, M. A. (2009). "A New and Efficient Estimation
//!   Method for the Generalized Pareto Distribution".

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - core smoothing algorithms.
mod algorithms;

// Layer 4: Evaluation - post-processing and diagnostics.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - input-form adapters.
mod adapters;

// High-level fluent API for PSIS.
mod api;

// Standard PSIS prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Array, Matrix, Vector},
        CvMethod::Loo,
        DiagnosticCounts, LooPointwise, LooSummary, PsisBuilder as Psis, PsisError, PsisLooResult,
        PsisResult,
        SampleSource::{Mcmc, Other, Vi},
        ShapeStatus, SmoothedVector, SummaryRow, TailReason,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
