//! Layer 6: Adapters
//!
//! This layer provides user-facing APIs that adapt the parallel engine for
//! the supported input forms:
//!
//! - **Array**: 3-D [data_point, draw, chain] arrays, parallel by default
//! - **Matrix**: 2-D matrices with an explicit chain index, parallel by default
//! - **Vector**: single-point smoothing, delegated unchanged to `psis`

// 3-D array adapter with parallel tail pass.
pub mod array;

// 2-D matrix + chain-index adapter with parallel tail pass.
pub mod matrix;
