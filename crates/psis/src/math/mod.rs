//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout PSIS:
//! - Generalized Pareto fitting and quantiles
//! - Stable exponential-domain reductions (log-sum-exp, softmax)
//!
//! These are reusable mathematical building blocks with no algorithm-specific logic.
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
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Generalized Pareto fit and inverse CDF.
pub mod gpd;

/// Stable log-sum-exp and softmax.
pub mod stable;
