//! Checks raw index pairs against their node counts.

use crate::error::{HitsError, Result};
use crate::types::{HostInt, Side};

/// Pairs that passed validation, converted to compact indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validated {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
    /// True when `left` is non-decreasing.
    pub sorted: bool,
}

impl Validated {
    pub fn len(&self) -> usize { self.left.len() }
    pub fn is_empty(&self) -> bool { self.left.is_empty() }
}

/// Checks a single index against `1 ..= bound`.
///
/// The `position` is 1-based and only used to report errors.
pub fn check_index(value: impl HostInt, side: Side, position: usize, bound: usize) -> Result<u32> {
    let value = value.value().ok_or(HitsError::Missing { side, position })?;
    let out_of_range = HitsError::OutOfRange { side, position, value, bound };
    if value < 1 || value as u64 > bound as u64 { return Err(out_of_range); }
    u32::try_from(value).map_err(|_| out_of_range)
}

/// Checks that node counts can be addressed by `u32` indices.
pub fn check_node_counts(n_left: usize, n_right: usize) -> Result<()> {
    if u32::try_from(n_left).is_err() || u32::try_from(n_right).is_err() {
        return Err(HitsError::TooManyHits);
    }
    Ok(())
}

/// Validates `left` and `right` as hits between `n_left` and `n_right` nodes.
///
/// Every left index must be in `1 ..= n_left` and every right index in `1 ..= n_right`.
/// Sortedness is determined in the same pass. The first offending pair, in input order,
/// is reported; for a single pair the left index is checked first.
pub fn validate<L: HostInt, R: HostInt>(left: &[L], right: &[R], n_left: usize, n_right: usize) -> Result<Validated> {
    check_node_counts(n_left, n_right)?;
    if left.len() != right.len() {
        return Err(HitsError::LengthMismatch { left: left.len(), right: right.len() });
    }

    let mut output = Validated {
        left: Vec::with_capacity(left.len()),
        right: Vec::with_capacity(right.len()),
        sorted: true,
    };

    let mut prev = 0;
    for (index, (l, r)) in left.iter().zip(right.iter()).enumerate() {
        let l = check_index(*l, Side::Left, index + 1, n_left)?;
        let r = check_index(*r, Side::Right, index + 1, n_right)?;
        output.sorted &= prev <= l;
        prev = l;
        output.left.push(l);
        output.right.push(r);
    }

    Ok(output)
}
