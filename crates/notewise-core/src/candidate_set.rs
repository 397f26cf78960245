//! Candidate digit sets.

use std::{
    fmt::{self, Display},
    iter::FusedIterator,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not},
};

use crate::Digit;

const FULL_MASK: u16 = 0x1FF;

/// A set of candidate digits (1-9) backed by a 9-bit mask.
///
/// Cells use this type for their remaining notes; house bookkeeping uses it
/// for placed-value sets. The cardinality is always the popcount of the
/// mask, so `len` is O(1).
///
/// # Examples
///
/// ```
/// use notewise_core::{CandidateSet, Digit};
///
/// let mut set = CandidateSet::new();
/// assert!(set.insert(Digit::new(2)));
/// assert!(set.insert(Digit::new(5)));
/// assert!(!set.insert(Digit::new(5))); // already present
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(Digit::new(2)));
///
/// let other = CandidateSet::from_iter([Digit::new(5), Digit::new(7)]);
/// assert_eq!(set.intersection(other).len(), 1);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateSet {
    mask: u16,
}

impl CandidateSet {
    /// The empty set.
    pub const EMPTY: Self = Self { mask: 0 };

    /// The full set containing every digit 1-9.
    pub const FULL: Self = Self { mask: FULL_MASK };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Creates a set containing a single digit.
    #[must_use]
    pub const fn from_digit(digit: Digit) -> Self {
        Self {
            mask: 1 << digit.index(),
        }
    }

    /// Inserts a digit, returning `true` if it was absent.
    pub fn insert(&mut self, digit: Digit) -> bool {
        let bit = 1 << digit.index();
        let added = self.mask & bit == 0;
        self.mask |= bit;
        added
    }

    /// Removes a digit, returning `true` if it was present.
    pub fn remove(&mut self, digit: Digit) -> bool {
        let bit = 1 << digit.index();
        let removed = self.mask & bit != 0;
        self.mask &= !bit;
        removed
    }

    /// Inserts every member of `other`, returning `true` if any was newly added.
    pub fn insert_all(&mut self, other: Self) -> bool {
        let before = self.mask;
        self.mask |= other.mask;
        self.mask != before
    }

    /// Removes every member of `other`, returning `true` if any was present.
    pub fn remove_all(&mut self, other: Self) -> bool {
        let before = self.mask;
        self.mask &= !other.mask;
        self.mask != before
    }

    /// Returns `true` if the digit is a member.
    #[must_use]
    pub const fn contains(self, digit: Digit) -> bool {
        self.mask & (1 << digit.index()) != 0
    }

    /// Returns the number of members.
    #[must_use]
    pub const fn len(self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.mask == 0
    }

    /// Returns the sole member if the set has exactly one.
    #[must_use]
    pub fn as_single(self) -> Option<Digit> {
        (self.len() == 1).then(|| {
            #[expect(clippy::cast_possible_truncation)]
            Digit::from_index(self.mask.trailing_zeros() as u8)
        })
    }

    /// Returns the members present in both sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            mask: self.mask & other.mask,
        }
    }

    /// Returns the members present in either set.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            mask: self.mask | other.mask,
        }
    }

    /// Returns the members of `self` that are not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self {
            mask: self.mask & !other.mask,
        }
    }

    /// Returns `true` if every member of `other` is also in `self`.
    #[must_use]
    pub const fn is_superset(self, other: Self) -> bool {
        self.mask & other.mask == other.mask
    }

    /// Enumerates every size-`k` subset of the 9 candidate slots.
    ///
    /// Yields all C(9, k) combinations in ascending mask order. Used to try
    /// every candidate combination when searching for naked and hidden
    /// tuples.
    ///
    /// # Panics
    ///
    /// Panics if `k` is greater than 9.
    ///
    /// # Examples
    ///
    /// ```
    /// use notewise_core::CandidateSet;
    ///
    /// assert_eq!(CandidateSet::subsets(2).count(), 36);
    /// assert_eq!(CandidateSet::subsets(9).count(), 1);
    /// ```
    #[must_use]
    pub fn subsets(k: usize) -> Subsets {
        assert!(k <= 9, "subset size out of range");
        let first = if k == 0 { 0 } else { (1u16 << k) - 1 };
        Subsets {
            next: Some(first),
            size: k,
        }
    }

    /// Returns an iterator over members in ascending digit order.
    pub fn iter(self) -> Iter {
        Iter { mask: self.mask }
    }
}

impl FromIterator<Digit> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Digit>>(iter: I) -> Self {
        let mut set = Self::new();
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl IntoIterator for CandidateSet {
    type Item = Digit;
    type IntoIter = Iter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl BitAnd for CandidateSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitAndAssign for CandidateSet {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

impl BitOr for CandidateSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for CandidateSet {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl Not for CandidateSet {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            mask: !self.mask & FULL_MASK,
        }
    }
}

impl Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, digit) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{digit}")?;
        }
        write!(f, "}}")
    }
}

/// Iterator over the members of a [`CandidateSet`] in ascending order.
#[derive(Debug, Clone)]
pub struct Iter {
    mask: u16,
}

impl Iterator for Iter {
    type Item = Digit;

    fn next(&mut self) -> Option<Digit> {
        if self.mask == 0 {
            return None;
        }
        #[expect(clippy::cast_possible_truncation)]
        let index = self.mask.trailing_zeros() as u8;
        self.mask &= self.mask - 1;
        Some(Digit::from_index(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.mask.count_ones() as usize;
        (len, Some(len))
    }
}

impl FusedIterator for Iter {}
impl ExactSizeIterator for Iter {}

/// Iterator over all size-`k` subsets of the 9 candidate slots.
///
/// Produced by [`CandidateSet::subsets`]. Advances with Gosper's hack to
/// visit masks of equal popcount in ascending order.
#[derive(Debug, Clone)]
pub struct Subsets {
    next: Option<u16>,
    size: usize,
}

impl Iterator for Subsets {
    type Item = CandidateSet;

    fn next(&mut self) -> Option<CandidateSet> {
        let mask = self.next?;
        if mask > FULL_MASK {
            self.next = None;
            return None;
        }
        self.next = if self.size == 0 {
            None
        } else {
            // Gosper's hack: next mask with the same popcount.
            let c = mask & mask.wrapping_neg();
            let r = mask + c;
            Some(r | (((mask ^ r) >> 2) / c))
        };
        Some(CandidateSet { mask })
    }
}

impl FusedIterator for Subsets {}
