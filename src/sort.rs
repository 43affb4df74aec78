//! Sorting hits into canonical order: non-decreasing left index, stable on ties.
//!
//! Two algorithms are available. The counting sort tabulates left indices into buckets
//! and places each hit directly at its final position, in time linear in the hits plus
//! the left nodes. The comparison sort orders hit positions by left index with a stable
//! sort, and is preferred when there are fewer hits than left nodes.
//!
//! Both produce the same output, and optionally the reverse map: for each output position
//! the 1-based position of the hit in the input.

use crate::types::SortStrategy;

/// Hits in canonical order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sorted {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
    /// 1-based input positions, when requested.
    pub revmap: Option<Vec<u32>>,
}

/// The algorithm `sort_pairs` settles on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Path {
    Identity,
    Counting,
    Comparison,
}

/// Decides how `n_hits` hits over `n_left` left nodes should be sorted.
pub fn choose(n_hits: usize, n_left: usize, sorted: bool, strategy: SortStrategy) -> Path {
    if sorted || n_hits <= 1 || n_left <= 1 { return Path::Identity; }
    match strategy {
        SortStrategy::Auto => if n_hits >= n_left { Path::Counting } else { Path::Comparison },
        SortStrategy::Counting => Path::Counting,
        SortStrategy::Comparison => Path::Comparison,
    }
}

/// Sorts validated pairs by left index.
///
/// The `sorted` argument indicates that `left` is known to be non-decreasing, in which
/// case the pairs are returned as they are. All left indices must be in `1 ..= n_left`.
pub fn sort_pairs(left: Vec<u32>, right: Vec<u32>, n_left: usize, sorted: bool, strategy: SortStrategy, revmap: bool) -> Sorted {
    debug_assert_eq!(left.len(), right.len());
    let path = choose(left.len(), n_left, sorted, strategy);
    log::debug!("sorting {} hits over {} left nodes: {:?}", left.len(), n_left, path);
    match path {
        Path::Identity => {
            let revmap = revmap.then(|| identity(left.len()));
            Sorted { left, right, revmap }
        }
        Path::Counting => counting_sort(&left, &right, n_left, revmap),
        Path::Comparison => comparison_sort(&left, &right, revmap),
    }
}

/// The identity reverse map on `len` hits.
pub fn identity(len: usize) -> Vec<u32> { (1 ..= len as u32).collect() }

/// Counts the occurrences of each index in `1 ..= n_nodes`.
///
/// Slot `i` of the result counts the occurrences of index `i + 1`.
pub fn tabulate(indices: &[u32], n_nodes: usize) -> Vec<usize> {
    #[cfg(feature = "parallel")]
    {
        if indices.len() >= PARALLEL_THRESHOLD {
            return tabulate_parallel(indices, n_nodes);
        }
    }
    let mut counts = vec![0; n_nodes];
    for index in indices.iter() { counts[*index as usize - 1] += 1; }
    counts
}

/// Below this many hits the bucket count is not worth spreading across threads.
#[cfg(feature = "parallel")]
pub const PARALLEL_THRESHOLD: usize = 1 << 20;

/// Partial counts per chunk of `indices`, merged before returning.
#[cfg(feature = "parallel")]
fn tabulate_parallel(indices: &[u32], n_nodes: usize) -> Vec<usize> {
    use rayon::prelude::*;
    indices
        .par_chunks(1 << 16)
        .fold(|| vec![0usize; n_nodes], |mut counts, chunk| {
            for index in chunk.iter() { counts[*index as usize - 1] += 1; }
            counts
        })
        .reduce(|| vec![0usize; n_nodes], |mut total, part| {
            total.iter_mut().zip(part).for_each(|(t, p)| *t += p);
            total
        })
}

/// Tabulated sort, in time `O(n + n_left)`.
///
/// Hits are visited in input order and appended at the current offset of their bucket,
/// which makes the sort stable. The left output is rebuilt from the bucket counts.
pub fn counting_sort(left: &[u32], right: &[u32], n_left: usize, revmap: bool) -> Sorted {

    // Scratch offsets, one per left node: counts, then exclusive prefix sums.
    let mut offsets = tabulate(left, n_left);
    let mut total = 0;
    for offset in offsets.iter_mut() {
        let count = *offset;
        *offset = total;
        total += count;
    }

    let mut right_out = vec![0; right.len()];
    let mut revmap_out = revmap.then(|| vec![0; right.len()]);
    for (index, (l, r)) in left.iter().zip(right.iter()).enumerate() {
        let offset = &mut offsets[*l as usize - 1];
        right_out[*offset] = *r;
        if let Some(revmap) = revmap_out.as_mut() { revmap[*offset] = index as u32 + 1; }
        *offset += 1;
    }

    // Each offset now marks the end of its bucket.
    let mut left_out = Vec::with_capacity(left.len());
    let mut start = 0;
    for (label, end) in offsets.iter().enumerate() {
        left_out.extend(std::iter::repeat_n(label as u32 + 1, end - start));
        start = *end;
    }

    Sorted { left: left_out, right: right_out, revmap: revmap_out }
}

/// Comparison sort, in time `O(n log n)`.
///
/// Positions are ordered by left index with a stable sort, and both columns are gathered
/// through the resulting permutation.
pub fn comparison_sort(left: &[u32], right: &[u32], revmap: bool) -> Sorted {
    let mut order = (0 .. left.len() as u32).collect::<Vec<_>>();
    order.sort_by_key(|k| left[*k as usize]);

    let left_out = order.iter().map(|k| left[*k as usize]).collect();
    let right_out = order.iter().map(|k| right[*k as usize]).collect();
    let revmap_out = revmap.then(|| order.iter().map(|k| k + 1).collect());

    Sorted { left: left_out, right: right_out, revmap: revmap_out }
}
