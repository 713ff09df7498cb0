use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable identifier for network objects.
///
/// - `u32` keeps memory small
/// - `NonZero` enables `Option<Id>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    ///
    /// Returns `None` for `u32::MAX`, which has no successor.
    pub fn try_from_index(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Create an Id from a 0-based index.
    ///
    /// # Panics
    /// Panics if `index == u32::MAX`.
    pub fn from_index(index: u32) -> Self {
        Self::try_from_index(index).expect("index+1 is nonzero")
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// 0-based index as `usize`, for slice access.
    pub fn as_usize(self) -> usize {
        self.index() as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type NodeId = Id;
pub type LinkId = Id;


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_index_below_max_round_trips(index in 0_u32..u32::MAX) {
            let id = Id::try_from_index(index).unwrap();
            prop_assert_eq!(id.index(), index);
        }

        #[test]
        fn ordering_follows_index(a in 0_u32..1_000_000, b in 0_u32..1_000_000) {
            prop_assert_eq!(Id::from_index(a).cmp(&Id::from_index(b)), a.cmp(&b));
        }
    }
}
