//! Reducing hits to one value per left node.

use crate::error::{HitsError, Result};
use crate::types::{HostInt, SelectMode};
use crate::validate::validate;

/// One slot per left node, as produced by a select reduction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Aggregate {
    /// A chosen right index for each left node, or `None` if nothing was chosen.
    Picks(Vec<Option<u32>>),
    /// The number of hits for each left node.
    Counts(Vec<usize>),
}

impl Aggregate {
    pub fn len(&self) -> usize {
        match self {
            Aggregate::Picks(picks) => picks.len(),
            Aggregate::Counts(counts) => counts.len(),
        }
    }
    pub fn is_empty(&self) -> bool { self.len() == 0 }
    pub fn picks(&self) -> Option<&[Option<u32>]> { if let Aggregate::Picks(picks) = self { Some(picks) } else { None } }
    pub fn counts(&self) -> Option<&[usize]> { if let Aggregate::Counts(counts) = self { Some(counts) } else { None } }
}

/// Validates `left` and `right` as hits, then reduces them per left node.
///
/// See `select_validated` for the reduction itself.
pub fn select_hits<L: HostInt, R: HostInt>(
    left: &[L],
    right: &[R],
    n_left: usize,
    n_right: usize,
    mode: SelectMode,
    dedup: bool,
) -> Result<Aggregate>
{
    check_mode(mode, dedup)?;
    let valid = validate(left, right, n_left, n_right)?;
    select_validated(&valid.left, &valid.right, n_left, n_right, mode, dedup)
}

/// Rejects option combinations before any work is done.
fn check_mode(mode: SelectMode, dedup: bool) -> Result<()> {
    if dedup && !mode.picks() { return Err(HitsError::DedupMode(mode)); }
    if mode == SelectMode::All { return Err(HitsError::NotReducible); }
    Ok(())
}

/// Reduces validated hits to one slot per left node, in a single pass.
///
/// With `dedup` set, a right index picked for one left node is not picked again for a
/// later left node. The pick of a left node only takes effect once the scan moves on to
/// a greater left index, which requires `left` to be sorted; the first decrease fails
/// with `HitsError::Unsorted`.
///
/// All indices must already be within `1 ..= n_left` and `1 ..= n_right`.
pub fn select_validated(left: &[u32], right: &[u32], n_left: usize, n_right: usize, mode: SelectMode, dedup: bool) -> Result<Aggregate> {
    check_mode(mode, dedup)?;
    log::trace!("selecting {} of {} hits over {} left nodes (dedup: {})", mode, left.len(), n_left, dedup);

    if mode == SelectMode::Count {
        return Ok(Aggregate::Counts(crate::sort::tabulate(left, n_left)));
    }

    let mut picks: Vec<Option<u32>> = vec![None; n_left];
    let mut used = if dedup { vec![false; n_right] } else { Vec::new() };
    let mut prev = 0;

    for (index, (l, r)) in left.iter().zip(right.iter()).enumerate() {
        if dedup && index > 0 {
            if *l < prev {
                return Err(HitsError::Unsorted { position: index + 1, previous: prev, found: *l });
            }
            // Leaving a group commits its pick, if it has one.
            if *l > prev {
                if let Some(pick) = picks[prev as usize - 1] { used[pick as usize - 1] = true; }
            }
        }
        prev = *l;

        if dedup && used[*r as usize - 1] { continue; }

        let slot = &mut picks[*l as usize - 1];
        let replace = match (*slot, mode) {
            (None, _) => true,
            (Some(current), SelectMode::First) => *r < current,
            (Some(current), SelectMode::Last) => *r > current,
            (Some(_), _) => false,
        };
        if replace { *slot = Some(*r); }
    }

    Ok(Aggregate::Picks(picks))
}
