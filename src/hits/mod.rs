//! The `Hits` table: a relation between left and right nodes, held as two columns.
//!
//! Hits are kept sorted by left index, and hits sharing a left index keep the order in
//! which they were supplied. This is what allows `LeftIndex` to locate the hits of any
//! left node by offset alone.

use crate::error::{HitsError, Result};
use crate::select::{select_validated, Aggregate};
use crate::types::{BuildOptions, HostInt, SelectMode, Side, SortStrategy};
use crate::validate::{check_index, check_node_counts, validate, Validated};

pub mod index;

use index::LeftIndex;

/// An immutable, sorted list of hits between `n_left` left nodes and `n_right` right nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hits {
    left: Vec<u32>,
    right: Vec<u32>,
    n_left: usize,
    n_right: usize,
    /// Left and right nodes are the same set.
    self_hits: bool,
}

impl Hits {
    /// Validates and sorts hits, with default options.
    pub fn new<L: HostInt, R: HostInt>(left: &[L], right: &[R], n_left: usize, n_right: usize) -> Result<Self> {
        build_hits(left, right, n_left, n_right, &BuildOptions::default()).map(|(hits, _)| hits)
    }

    /// Assembles a table from columns already in canonical order.
    pub(crate) fn from_sorted_parts(left: Vec<u32>, right: Vec<u32>, n_left: usize, n_right: usize, self_hits: bool) -> Self {
        debug_assert_eq!(left.len(), right.len());
        debug_assert!(left.is_sorted());
        Self { left, right, n_left, n_right, self_hits }
    }

    fn from_validated(valid: Validated, n_left: usize, n_right: usize, options: &BuildOptions) -> (Self, Option<ReverseMap>) {
        let sorted = crate::sort::sort_pairs(valid.left, valid.right, n_left, valid.sorted, options.strategy, options.reverse_map);
        let hits = Self::from_sorted_parts(sorted.left, sorted.right, n_left, n_right, false);
        (hits, sorted.revmap.map(ReverseMap))
    }

    pub fn left(&self) -> &[u32] { &self.left }
    pub fn right(&self) -> &[u32] { &self.right }
    pub fn n_left(&self) -> usize { self.n_left }
    pub fn n_right(&self) -> usize { self.n_right }
    pub fn len(&self) -> usize { self.left.len() }
    pub fn is_empty(&self) -> bool { self.left.is_empty() }
    pub fn is_self_hits(&self) -> bool { self.self_hits }

    /// Hits as `(left, right)` pairs, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.left.iter().copied().zip(self.right.iter().copied())
    }

    /// Offsets locating the hits of each left node.
    pub fn left_index(&self) -> LeftIndex<'_> { LeftIndex::new(self) }

    /// The number of hits for each left node.
    pub fn count_left(&self) -> Vec<usize> { crate::sort::tabulate(&self.left, self.n_left) }
    /// The number of hits for each right node.
    pub fn count_right(&self) -> Vec<usize> { crate::sort::tabulate(&self.right, self.n_right) }

    /// Reduces the hits per left node, or returns them all for `SelectMode::All`.
    pub fn select(&self, mode: SelectMode, dedup: bool) -> Result<Selection> {
        if mode == SelectMode::All {
            if dedup { return Err(HitsError::DedupMode(mode)); }
            return Ok(Selection::All(self.clone()));
        }
        select_validated(&self.left, &self.right, self.n_left, self.n_right, mode, dedup).map(Selection::Reduced)
    }

    /// Exchanges the roles of left and right nodes.
    ///
    /// The result is sorted by its new left index, and hits sharing it keep their current order.
    /// The reverse map relates each transposed hit to its position in `self`.
    pub fn transpose(&self) -> (Self, ReverseMap) {
        let sorted = crate::sort::sort_pairs(self.right.clone(), self.left.clone(), self.n_right, false, SortStrategy::Auto, true);
        let hits = Self::from_sorted_parts(sorted.left, sorted.right, self.n_right, self.n_left, self.self_hits);
        let revmap = sorted.revmap.unwrap_or_else(|| crate::sort::identity(self.len()));
        (hits, ReverseMap(revmap))
    }

    /// Marks the table as relating a node set to itself.
    pub fn into_self_hits(mut self) -> Result<Self> {
        if self.n_left != self.n_right {
            return Err(HitsError::NotSelfHits { n_left: self.n_left, n_right: self.n_right });
        }
        self.self_hits = true;
        Ok(self)
    }

    /// For each hit, whether it relates a node to itself.
    pub fn self_hit_mask(&self) -> Vec<bool> { self.iter().map(|(l, r)| l == r).collect() }
}

/// The outcome of `Hits::select`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    All(Hits),
    Reduced(Aggregate),
}

/// For each position of a sorted table, the 1-based position of the hit as supplied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReverseMap(Vec<u32>);

impl ReverseMap {
    pub fn as_slice(&self) -> &[u32] { &self.0 }
    pub fn into_inner(self) -> Vec<u32> { self.0 }
    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ { self.0.iter().copied() }
    /// Reorders `input`, given in supplied order, to match the sorted table.
    pub fn gather<T: Clone>(&self, input: &[T]) -> Vec<T> {
        self.0.iter().map(|pos| input[*pos as usize - 1].clone()).collect()
    }
}

/// Validates and sorts `left` and `right` into a `Hits` table.
///
/// Returns the reverse map as well when `options.reverse_map` is set. Input already sorted
/// by left index is kept in place, with an identity reverse map.
pub fn build_hits<L: HostInt, R: HostInt>(
    left: &[L],
    right: &[R],
    n_left: usize,
    n_right: usize,
    options: &BuildOptions,
) -> Result<(Hits, Option<ReverseMap>)>
{
    if left.len() > u32::MAX as usize { return Err(HitsError::TooManyHits); }
    let valid = validate(left, right, n_left, n_right)?;
    Ok(Hits::from_validated(valid, n_left, n_right, options))
}

/// Accumulates hits one at a time, validating each as it arrives.
#[derive(Clone, Debug)]
pub struct HitsBuilder {
    valid: Validated,
    n_left: usize,
    n_right: usize,
}

impl HitsBuilder {
    /// Starts an empty builder, failing if either node count exceeds `u32::MAX`.
    pub fn new(n_left: usize, n_right: usize) -> Result<Self> {
        check_node_counts(n_left, n_right)?;
        Ok(Self { valid: Validated { sorted: true, ..Default::default() }, n_left, n_right })
    }

    pub fn len(&self) -> usize { self.valid.len() }
    pub fn is_empty(&self) -> bool { self.valid.is_empty() }

    /// Adds a hit, or reports why it is invalid and leaves the builder as it was.
    pub fn push(&mut self, left: impl HostInt, right: impl HostInt) -> Result<()> {
        let position = self.valid.len() + 1;
        let l = check_index(left, Side::Left, position, self.n_left)?;
        let r = check_index(right, Side::Right, position, self.n_right)?;
        if self.valid.len() >= u32::MAX as usize { return Err(HitsError::TooManyHits); }
        self.valid.sorted &= self.valid.left.last().is_none_or(|prev| *prev <= l);
        self.valid.left.push(l);
        self.valid.right.push(r);
        Ok(())
    }

    pub fn finish(self, options: &BuildOptions) -> (Hits, Option<ReverseMap>) {
        Hits::from_validated(self.valid, self.n_left, self.n_right, options)
    }
}
