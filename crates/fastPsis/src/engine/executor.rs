//! Parallel execution engine for PSIS tail smoothing.
//!
//! ## Purpose
//!
//! This module provides the parallel tail pass that is injected into the
//! `psis` crate's execution engine. Data points are independent, so the
//! per-point smoothing loop distributes directly across CPU cores.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacement for the sequential tail pass.
//! * **Parallelism**: Uses `rayon` for data-parallel execution across CPU cores.
//! * **Optimization**: Task-local scratch buffers via `map_init` to minimize
//!   allocations.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Disjoint rows**: `par_chunks_mut` splits the flat weight storage into
//!   one mutable row per data point; no synchronization is needed.
//! * **Determinism**: Per-row arithmetic is identical to the sequential
//!   pass, so results do not depend on thread count or scheduling.
//!
//! ## Invariants
//!
//! * Row storage length is a multiple of `sample_size`.
//! * `r_eff` has one entry per row.
//!
//! ## Non-goals
//!
//! * This module does not normalize weights (handled by `psis`'s executor).
//! * This module does not validate input data (handled by the validator).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use num_traits::Float;

// Export dependencies from psis crate
use psis::internals::algorithms::tail::{default_tail_length, smooth_ratio_row};
use psis::internals::engine::executor::TailPassOutput;
use psis::internals::primitives::buffer::TailBuffer;
use psis::internals::primitives::errors::PsisError;

// ============================================================================
// Parallel Tail Pass
// ============================================================================

/// Smooth every data point's tail in parallel.
///
/// Matches the engine's `TailPassFn` contract: each row of raw log-ratios is
/// exponentiated relative to its maximum, smoothed in place, and its fitted
/// shape and tail length collected in row order.
#[cfg(feature = "cpu")]
pub fn tail_pass_parallel<T>(
    rows: &mut [T],
    sample_size: usize,
    r_eff: &[T],
    min_grid_pts: usize,
    wip: bool,
) -> Result<TailPassOutput<T>, PsisError>
where
    T: Float + Send + Sync,
{
    let per_row: Result<Vec<(T, usize)>, PsisError> = rows
        .par_chunks_mut(sample_size)
        .enumerate()
        .map_init(
            || TailBuffer::with_capacity(sample_size),
            |buf, (i, row)| {
                let max = row.iter().copied().fold(T::neg_infinity(), T::max);
                for v in row.iter_mut() {
                    *v = (*v - max).exp();
                }
                let tail_len = default_tail_length(sample_size, r_eff[i]);
                smooth_ratio_row(row, tail_len, r_eff[i], wip, min_grid_pts, buf)
            },
        )
        .collect();

    let per_row = per_row?;
    let (pareto_k, tail_len) = per_row.into_iter().unzip();

    Ok(TailPassOutput { pareto_k, tail_len })
}
