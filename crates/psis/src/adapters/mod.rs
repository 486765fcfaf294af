//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing APIs that adapt the engine layer for the
//! supported input forms:
//!
//! - **Array**: 3-D [data_point, draw, chain] arrays
//! - **Matrix**: 2-D [data_point, draw] matrices with an explicit chain index
//! - **Vector**: a single data point's log ratios, smoothed in the log domain
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// 3-D array adapter, the primary entry form.
pub mod array;

/// 2-D matrix + chain-index adapter.
pub mod matrix;

/// Single-vector log-domain adapter.
pub mod vector;
