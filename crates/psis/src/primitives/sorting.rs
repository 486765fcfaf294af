//! Tail partitioning utilities for importance-ratio vectors.
//!
//! ## Purpose
//!
//! This module isolates the largest `tail_len` elements of a ratio vector
//! while tracking their original positions, so smoothed values can be written
//! back in place afterwards.
//!
//! ## Design notes
//!
//! * **Partial selection**: Uses `select_nth_unstable_by` rather than a full
//!   sort; only the tail needs a total order, the body is left unordered.
//! * **Index tracking**: Every selected element carries its original index,
//!   so restoring the permutation is a plain indexed write-back.
//! * **Scratch reuse**: The pair buffer is caller-owned and recycled across
//!   data points to avoid per-row allocations.
//!
//! ## Key concepts
//!
//! ### Select-Smooth-Scatter Pattern
//! 1. **Select**: Partition the row so the `tail_len` largest values sit at the end.
//! 2. **Smooth**: Replace tail values with fitted order statistics (elsewhere).
//! 3. **Scatter**: Write each new value back through its remembered index.
//!
//! ## Invariants
//!
//! * After `partition_tail`, the last `tail_len` pairs hold the largest values
//!   in ascending order, and the returned cutoff is the largest body value.
//! * Stored indices form a subset of `0..n` with no duplicates.
//!
//! ## Non-goals
//!
//! * This module does not validate tails or fit distributions.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// ============================================================================
// Tail Partitioning
// ============================================================================

/// Partition `values` so its `tail_len` largest elements occupy the end of
/// `pairs`, sorted ascending and tagged with their original indices.
///
/// Returns the cutoff: the value immediately preceding the tail in sorted
/// order. `pairs` is cleared and refilled; its capacity is reused.
///
/// Caller guarantees `0 < tail_len < values.len()`.
pub fn partition_tail<T: Float>(
    values: &[T],
    tail_len: usize,
    pairs: &mut Vec<(T, usize)>,
) -> T {
    let n = values.len();
    debug_assert!(tail_len > 0 && tail_len < n);

    pairs.clear();
    pairs.extend(values.iter().copied().enumerate().map(|(i, v)| (v, i)));

    // Place the cutoff at its final sorted position; everything after it is
    // the (unordered) tail.
    let cutoff_pos = n - tail_len - 1;
    pairs.select_nth_unstable_by(cutoff_pos, compare_pairs);
    let cutoff = pairs[cutoff_pos].0;

    // Only the tail needs a total order (for plotting positions).
    pairs[n - tail_len..].sort_unstable_by(compare_pairs);

    cutoff
}

/// Value-ordering comparator; NaN compares equal so selection stays total.
#[inline]
fn compare_pairs<T: Float>(a: &(T, usize), b: &(T, usize)) -> Ordering {
    a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal)
}

/// Scatter smoothed tail values back to their original positions.
#[inline]
pub fn scatter_tail<T: Float>(row: &mut [T], tail: &[(T, usize)]) {
    for &(value, idx) in tail {
        row[idx] = value;
    }
}
