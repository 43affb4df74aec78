pub mod error;
pub mod validate;
pub mod sort;
pub mod select;
pub mod groups;
pub mod hits;

pub use error::{ErrorKind, HitsError, Result};
pub use groups::group_pairs;
pub use hits::{build_hits, Hits, HitsBuilder, ReverseMap, Selection};
pub use hits::index::LeftIndex;
pub use select::{select_hits, Aggregate};
pub use types::{BuildOptions, HitType, HostInt, SelectMode, Side, SortStrategy};

pub mod types {

    use crate::error::HitsError;

    /// An integer supplied by a host, which may be missing.
    ///
    /// Unsigned values too large for `i64` saturate, so that they fail range checks
    /// rather than being mistaken for missing values.
    pub trait HostInt: Copy {
        /// The value as a signed integer, or `None` if missing.
        fn value(self) -> Option<i64>;
    }

    impl HostInt for i32 { fn value(self) -> Option<i64> { Some(self as i64) } }
    impl HostInt for i64 { fn value(self) -> Option<i64> { Some(self) } }
    impl HostInt for u32 { fn value(self) -> Option<i64> { Some(self as i64) } }
    impl HostInt for u64 { fn value(self) -> Option<i64> { Some(i64::try_from(self).unwrap_or(i64::MAX)) } }
    impl HostInt for usize { fn value(self) -> Option<i64> { Some(i64::try_from(self).unwrap_or(i64::MAX)) } }
    impl<T: HostInt> HostInt for Option<T> { fn value(self) -> Option<i64> { self.and_then(T::value) } }

    /// The two node sets of a bipartite relation.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum Side {
        Left,
        Right,
    }

    impl std::fmt::Display for Side {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Side::Left => write!(f, "left"),
                Side::Right => write!(f, "right"),
            }
        }
    }

    /// How hits are reduced to at most one value per left node.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum SelectMode {
        /// Every hit is kept; not a reduction.
        All,
        /// The smallest right index.
        First,
        /// The largest right index.
        Last,
        /// The first right index encountered.
        Arbitrary,
        /// The number of hits.
        Count,
    }

    impl SelectMode {
        pub fn as_str(&self) -> &'static str {
            match self {
                SelectMode::All => "all",
                SelectMode::First => "first",
                SelectMode::Last => "last",
                SelectMode::Arbitrary => "arbitrary",
                SelectMode::Count => "count",
            }
        }
        /// True for the modes that pick one right index, and so may deduplicate.
        pub fn picks(&self) -> bool {
            matches!(self, SelectMode::First | SelectMode::Last | SelectMode::Arbitrary)
        }
    }

    impl std::fmt::Display for SelectMode {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
    }

    impl std::str::FromStr for SelectMode {
        type Err = HitsError;
        fn from_str(text: &str) -> Result<Self, Self::Err> {
            match text {
                "all" => Ok(SelectMode::All),
                "first" => Ok(SelectMode::First),
                "last" => Ok(SelectMode::Last),
                "arbitrary" => Ok(SelectMode::Arbitrary),
                "count" => Ok(SelectMode::Count),
                _ => Err(HitsError::UnknownSelectMode(text.to_owned())),
            }
        }
    }

    /// Which pairs within a group are generated.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum HitType {
        /// Pairs with left greater than right.
        Lower,
        /// Every ordered pair, including self pairs.
        All,
        /// Pairs with left less than right.
        Upper,
    }

    impl TryFrom<i64> for HitType {
        type Error = HitsError;
        fn try_from(code: i64) -> Result<Self, Self::Error> {
            match code {
                -1 => Ok(HitType::Lower),
                0 => Ok(HitType::All),
                1 => Ok(HitType::Upper),
                _ => Err(HitsError::UnknownHitType(code)),
            }
        }
    }

    /// The sorting algorithm used to put hits in canonical order.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub enum SortStrategy {
        /// Counting sort when there are at least as many hits as left nodes, comparison sort otherwise.
        #[default]
        Auto,
        /// Always the counting sort.
        Counting,
        /// Always the comparison sort.
        Comparison,
    }

    /// Options for building a `Hits` table from raw pairs.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct BuildOptions {
        /// Produce a `ReverseMap` relating sorted positions to input positions.
        pub reverse_map: bool,
        pub strategy: SortStrategy,
    }

    impl BuildOptions {
        pub fn with_reverse_map(mut self) -> Self { self.reverse_map = true; self }
        pub fn with_strategy(mut self, strategy: SortStrategy) -> Self { self.strategy = strategy; self }
    }
}
