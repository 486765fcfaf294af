//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the core PSIS algorithm: per-data-point tail
//! isolation and generalized Pareto smoothing of importance ratios.
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-data-point tail smoothing.
pub mod tail;
