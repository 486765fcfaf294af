//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer post-processes smoothed weights: effective-sample-size
//! estimation, Pareto-k reliability diagnostics, and leave-one-out
//! cross-validation aggregation.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Leave-one-out aggregation and the cross-validation method registry.
pub mod cv;

/// Pareto-k severity tiers.
pub mod diagnostics;

/// Effective sample size of normalized weights.
pub mod ess;
