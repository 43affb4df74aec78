//! Offsets into a `Hits` table, one range per left node.

use std::ops::Range;
use columnar::{Index, Len};
use crate::hits::Hits;

/// The hits of each left node, located by offset.
///
/// The bounds have one entry per left node plus a leading zero, so that the hits of
/// left node `i` occupy positions `bounds[i-1] .. bounds[i]` of the table. As a columnar
/// container, slot `i` holds the right indices of left node `i + 1`.
#[derive(Clone, Debug)]
pub struct LeftIndex<'a> {
    hits: &'a Hits,
    bounds: Vec<u64>,
}

impl<'a> LeftIndex<'a> {
    /// Locates the end of each left node's run in the sorted left column.
    pub fn new(hits: &'a Hits) -> Self {
        let left = hits.left();
        let mut bounds = Vec::with_capacity(hits.n_left() + 1);
        bounds.push(0);
        let mut lower = 0;
        for label in 1 ..= hits.n_left() as u32 {
            gallop(left, &mut lower, left.len(), |x| x <= label);
            bounds.push(lower as u64);
        }
        Self { hits, bounds }
    }

    /// Positions in the table of the hits of left node `left` (1-based).
    ///
    /// Returns `None` unless `left` is in `1 ..= n_left`.
    pub fn range_of(&self, left: u32) -> Option<Range<usize>> {
        let index = (left as usize).checked_sub(1).filter(|index| *index < Len::len(self))?;
        Some(self.slot(index))
    }

    /// Right indices of the hits of left node `left` (1-based), in table order.
    ///
    /// Returns `None` unless `left` is in `1 ..= n_left`.
    pub fn hits_of(&self, left: u32) -> Option<&'a [u32]> {
        self.range_of(left).map(|range| &self.hits.right()[range])
    }

    /// Each left node paired with the right indices of its hits.
    pub fn groups(&self) -> impl Iterator<Item = (u32, &'a [u32])> + '_ {
        (0 .. Len::len(self)).map(move |index| (index as u32 + 1, self.get(index)))
    }

    fn slot(&self, index: usize) -> Range<usize> {
        self.bounds[index] as usize .. self.bounds[index + 1] as usize
    }
}

impl Len for LeftIndex<'_> {
    fn len(&self) -> usize { self.bounds.len() - 1 }
}

/// Slot `index` holds left node `index + 1`; indexing past `n_left` panics, as for slices.
impl<'a> Index for LeftIndex<'a> {
    type Ref = &'a [u32];
    fn get(&self, index: usize) -> Self::Ref { &self.hits.right()[self.slot(index)] }
}

/// Increments `lower` until just after the last element of `input` to satisfy `cmp`.
///
/// The method assumes that `cmp` is monotonic, never becoming true once it is false.
/// The search is constrained to `input[.. upper]`.
#[inline(always)]
pub(crate) fn gallop<T: Copy>(input: &[T], lower: &mut usize, upper: usize, mut cmp: impl FnMut(T) -> bool) {
    // if empty input, or already >= element, return
    if *lower < upper && cmp(input[*lower]) {
        let mut step = 1;
        while *lower + step < upper && cmp(input[*lower + step]) {
            *lower += step;
            step <<= 1;
        }

        step >>= 1;
        while step > 0 {
            if *lower + step < upper && cmp(input[*lower + step]) {
                *lower += step;
            }
            step >>= 1;
        }

        *lower += 1;
    }
}
