//! All pairs within groups of consecutively numbered nodes.

use itertools::{iproduct, Itertools};

use crate::error::{HitsError, Result};
use crate::hits::Hits;
use crate::types::{HitType, HostInt};

/// Number of pairs `hit_type` generates in a group of `size` nodes.
fn pairs_in_group(size: u64, hit_type: HitType) -> Option<u64> {
    match hit_type {
        HitType::All => size.checked_mul(size),
        _ => size.checked_mul(size.saturating_sub(1)).map(|n| n / 2),
    }
}

/// Generates the self relation that pairs up nodes within each group.
///
/// Groups are numbered in the order of `sizes`, and their nodes consecutively from 1, so
/// that the group at offset `o` covers nodes `o + 1 ..= o + size`. Within a group, pairs are
/// emitted by increasing left node, then increasing right node; the result is in canonical
/// order without sorting.
pub fn group_pairs<G: HostInt>(sizes: &[G], hit_type: HitType) -> Result<Hits> {

    let mut checked = Vec::with_capacity(sizes.len());
    let mut n_hits = 0u64;
    for (index, size) in sizes.iter().enumerate() {
        let value = size.value();
        let size = value
            .and_then(|v| u64::try_from(v).ok())
            .ok_or(HitsError::BadGroupSize { position: index + 1, value })?;
        n_hits = pairs_in_group(size, hit_type)
            .and_then(|n| n_hits.checked_add(n))
            .ok_or(HitsError::TooManyHits)?;
        checked.push(size);
    }

    let n_nodes = checked.iter().try_fold(0u64, |total, size| total.checked_add(*size)).ok_or(HitsError::TooManyHits)?;
    if n_nodes >= u32::MAX as u64 || n_hits > u32::MAX as u64 { return Err(HitsError::TooManyHits); }
    log::trace!("generating {} {:?} pairs over {} groups", n_hits, hit_type, sizes.len());

    let mut left = Vec::with_capacity(n_hits as usize);
    let mut right = Vec::with_capacity(n_hits as usize);
    let mut offset = 0u32;
    for size in checked {
        let nodes = offset + 1 ..= offset + size as u32;
        match hit_type {
            HitType::Upper => {
                for (j, k) in nodes.tuple_combinations() { left.push(j); right.push(k); }
            }
            HitType::Lower => {
                for j in nodes.skip(1) {
                    for k in offset + 1 .. j { left.push(j); right.push(k); }
                }
            }
            HitType::All => {
                for (j, k) in iproduct!(nodes.clone(), nodes) { left.push(j); right.push(k); }
            }
        }
        offset += size as u32;
    }

    Ok(Hits::from_sorted_parts(left, right, offset as usize, offset as usize, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn pairs(hits: &Hits) -> Vec<(u32, u32)> { hits.iter().collect() }

    #[test]
    fn all_pairs_of_one_group() {
        let hits = group_pairs(&[3], HitType::All).unwrap();
        assert_eq!(hits.len(), 9);
        assert_eq!(pairs(&hits), iproduct!(1 ..= 3, 1 ..= 3).collect::<Vec<_>>());
        assert_eq!((hits.n_left(), hits.n_right()), (3, 3));
        assert!(hits.is_self_hits());
    }

    #[test]
    fn upper_triangle() {
        let hits = group_pairs(&[3], HitType::Upper).unwrap();
        assert_eq!(pairs(&hits), vec![(1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn lower_triangle_across_groups() {
        let hits = group_pairs(&[2, 3], HitType::Lower).unwrap();
        assert_eq!(pairs(&hits), vec![(2, 1), (4, 3), (5, 3), (5, 4)]);
        assert_eq!(hits.n_left(), 5);
    }

    #[test]
    fn empty_and_singleton_groups() {
        let hits = group_pairs(&[0, 1, 0, 2], HitType::Upper).unwrap();
        assert_eq!(pairs(&hits), vec![(2, 3)]);
        assert_eq!(hits.n_left(), 3);

        let hits = group_pairs(&[0, 1], HitType::All).unwrap();
        assert_eq!(pairs(&hits), vec![(1, 1)]);

        let hits = group_pairs::<i32>(&[], HitType::All).unwrap();
        assert!(hits.is_empty());
        assert_eq!(hits.n_left(), 0);
    }

    #[test]
    fn rejects_bad_sizes() {
        let err = group_pairs(&[2, -1], HitType::All).unwrap_err();
        assert_eq!(err, HitsError::BadGroupSize { position: 2, value: Some(-1) });
        assert_eq!(err.kind(), ErrorKind::Domain);

        let err = group_pairs(&[Some(2), None], HitType::Upper).unwrap_err();
        assert_eq!(err, HitsError::BadGroupSize { position: 2, value: None });
    }

    #[test]
    fn rejects_oversized_groups() {
        let err = group_pairs(&[1u64 << 40], HitType::All).unwrap_err();
        assert_eq!(err, HitsError::TooManyHits);
    }
}
