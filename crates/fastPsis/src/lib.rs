//! # Fast PSIS — Parallel Pareto-Smoothed Importance Sampling
//!
//! Rayon-parallel Pareto-smoothed importance sampling (PSIS) and
//! leave-one-out cross-validation (LOO-CV) for Bayesian models in **Rust**.
//!
//! This crate extends [`psis`](https://docs.rs/psis) with a parallel tail
//! pass: every data point's smoothing is independent, so the per-point loop
//! distributes across all available CPU cores. The numeric results are
//! identical to the sequential crate for the same input.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastPsis::prelude::*;
//! use ndarray::Array3;
//!
//! // Log importance ratios, indexed [data_point, draw, chain].
//! let log_ratios = Array3::from_shape_fn((20, 100, 4), |(i, d, c)| {
//!     ((i + 1) as f64 * (d as f64 + 0.5) * (c as f64 + 1.3)).sin() * 0.5
//! });
//!
//! // Build the model with parallel execution (default)
//! let model = Psis::new().adapter(Array).build()?;
//! let result = model.smooth(&log_ratios)?;
//!
//! assert_eq!(result.pareto_k.len(), 20);
//! # Result::<(), PsisError>::Ok(())
//! ```
//!
//! ### LOO-CV estimation
//!
//! ```rust
//! use fastPsis::prelude::*;
//! use ndarray::Array3;
//!
//! let log_lik = Array3::from_shape_fn((10, 200, 2), |(i, d, c)| {
//!     -1.0 - 0.5 * ((d as f64 * 0.37 + c as f64 * 1.1 + i as f64).sin()).powi(2)
//! });
//!
//! let model = Psis::new()
//!     .source(Mcmc)
//!     .cv_method(Loo)
//!     .adapter(Array)
//!     .parallel(true)     // explicit, but already the default
//!     .build()?;
//!
//! let loo = model.estimate(&log_lik)?;
//! assert!(loo.elpd().is_finite());
//! # Result::<(), PsisError>::Ok(())
//! ```
//!
//! ## When to use `fastPsis` vs `psis`
//!
//! - Use `fastPsis` when smoothing many data points at once (LOO over a
//!   full dataset); the tail pass scales with core count.
//! - Use `psis` when data-point counts are small, when the dependency
//!   footprint matters, or when deterministic single-threaded execution is
//!   required by the embedding environment (results are identical either
//!   way).

#![allow(non_snake_case)]

// Layer 5: Engine - parallel execution control.
mod engine;

// Layer 6: Adapters - input-form adapters.
mod adapters;

// High-level fluent API for PSIS.
mod api;

// Standard fastPsis prelude.
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
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
