//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the smoothing process by coordinating between
//! primitives (buffers, sorting) and algorithms (tail smoothing) and by
//! attaching evaluation results (effective sample sizes, diagnostics).
//! It owns validation, relative-efficiency resolution, and normalization.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Unified execution engine for PSIS.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for PSIS operations.
pub mod output;
