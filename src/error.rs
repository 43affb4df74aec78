//! Errors raised while building, reducing, or generating hits.

use thiserror::Error;

use crate::types::{SelectMode, Side};

pub type Result<T, E = HitsError> = std::result::Result<T, E>;

/// The broad class of a `HitsError`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value is missing or outside its valid range.
    Domain,
    /// An invalid option or combination of options.
    Usage,
    /// Input that must be sorted by left index is not.
    Ordering,
}

/// Errors that can occur when working with hits.
///
/// Positions are 1-based, counting hits (or group sizes) in the order supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HitsError {
    #[error("{side} index at position {position} is missing")]
    Missing { side: Side, position: usize },
    #[error("{side} index {value} at position {position} is not within 1..={bound}")]
    OutOfRange { side: Side, position: usize, value: i64, bound: usize },
    #[error("left and right indices differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("group size at position {position} is missing or negative")]
    BadGroupSize { position: usize, value: Option<i64> },
    #[error("hit count or node count is too large to index")]
    TooManyHits,
    #[error("select must be \"all\", \"first\", \"last\", \"arbitrary\", or \"count\", not {0:?}")]
    UnknownSelectMode(String),
    #[error("hit type must be -1, 0, or 1, not {0}")]
    UnknownHitType(i64),
    #[error("dedup is only supported when select is \"first\", \"last\", or \"arbitrary\", not \"{0}\"")]
    DedupMode(SelectMode),
    #[error("select \"all\" keeps every hit and does not reduce per left node")]
    NotReducible,
    #[error("a self relation needs equal node counts ({n_left} vs {n_right})")]
    NotSelfHits { n_left: usize, n_right: usize },
    #[error("dedup requires hits sorted by left index, but left index {found} at position {position} follows {previous}")]
    Unsorted { position: usize, previous: u32, found: u32 },
}

impl HitsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HitsError::Missing { .. } |
            HitsError::OutOfRange { .. } |
            HitsError::LengthMismatch { .. } |
            HitsError::BadGroupSize { .. } |
            HitsError::TooManyHits => ErrorKind::Domain,
            HitsError::UnknownSelectMode(_) |
            HitsError::UnknownHitType(_) |
            HitsError::DedupMode(_) |
            HitsError::NotReducible |
            HitsError::NotSelfHits { .. } => ErrorKind::Usage,
            HitsError::Unsorted { .. } => ErrorKind::Ordering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(HitsError::Missing { side: Side::Left, position: 1 }.kind(), ErrorKind::Domain);
        assert_eq!(HitsError::DedupMode(SelectMode::Count).kind(), ErrorKind::Usage);
        assert_eq!(HitsError::Unsorted { position: 2, previous: 3, found: 1 }.kind(), ErrorKind::Ordering);
    }

    #[test]
    fn messages_name_the_offender() {
        let err = HitsError::OutOfRange { side: Side::Right, position: 4, value: 9, bound: 5 };
        assert_eq!(err.to_string(), "right index 9 at position 4 is not within 1..=5");
        let err = HitsError::DedupMode(SelectMode::Count);
        assert!(err.to_string().ends_with("not \"count\""));
    }
}
