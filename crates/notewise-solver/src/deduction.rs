//! Strategy identifiers and deduction results.

use std::fmt::{self, Display};

use notewise_core::{CandidateSet, Digit, House, Position};
use tinyvec::TinyVec;

/// Identifier for one technique in the fixed catalogue.
///
/// Variants are declared in catalogue order, ascending in difficulty, so the
/// discriminant doubles as a dense index into per-technique tables and the
/// search cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum StrategyKind {
    /// Restore wrongly-emptied notes from the placed values around a cell.
    AmendNotes,
    /// Strike one note that conflicts with a value placed in a shared house.
    SimplifyNotes,
    /// A cell whose notes are down to a single digit.
    NakedSingle,
    /// A digit with a single possible cell within a house.
    HiddenSingle,
    /// Two cells in a house sharing the same two candidates.
    NakedPair,
    /// Two digits confined to the same two cells of a house.
    HiddenPair,
    /// A digit confined to one row or column inside a box.
    PointingPair,
    /// Three cells in a house covering exactly three candidates.
    NakedTriplet,
    /// A digit confined to a three-cell row or column segment inside a box.
    PointingTriplet,
    /// Three digits confined to the same three cells of a house.
    HiddenTriplet,
    /// A digit confined to one box within a row or column.
    BoxLineReduction,
    /// Four cells in a house covering exactly four candidates.
    NakedQuadruplet,
    /// Four digits confined to the same four cells of a house.
    HiddenQuadruplet,
    /// Five cells in a house covering exactly five candidates.
    NakedQuintuplet,
    /// Five digits confined to the same five cells of a house.
    HiddenQuintuplet,
    /// Six cells in a house covering exactly six candidates.
    NakedSextuplet,
    /// Six digits confined to the same six cells of a house.
    HiddenSextuplet,
    /// Seven cells in a house covering exactly seven candidates.
    NakedSeptuplet,
    /// Seven digits confined to the same seven cells of a house.
    HiddenSeptuplet,
    /// Eight cells in a house covering exactly eight candidates.
    NakedOctuplet,
    /// Eight digits confined to the same eight cells of a house.
    HiddenOctuplet,
    /// A digit boxed into two rows and two aligned columns (or vice versa).
    XWing,
    /// A digit boxed into three rows covered by three columns (or vice versa).
    Swordfish,
    /// Conjugate-pair coloring over a single digit.
    SinglesChaining,
}

/// Fixed difficulty range per technique, indexed by [`StrategyKind`]
/// discriminant. The exact numbers are calibration data: the shape (simple
/// techniques low, grid-spanning patterns high, hidden above naked at equal
/// size) is what the difficulty model depends on.
const DIFFICULTY_BOUNDS: [(u16, u16); StrategyKind::COUNT] = [
    (1, 1),     // AmendNotes
    (1, 2),     // SimplifyNotes
    (2, 6),     // NakedSingle
    (6, 14),    // HiddenSingle
    (10, 20),   // NakedPair
    (14, 28),   // HiddenPair
    (16, 32),   // PointingPair
    (16, 32),   // NakedTriplet
    (20, 40),   // PointingTriplet
    (22, 44),   // HiddenTriplet
    (24, 48),   // BoxLineReduction
    (24, 48),   // NakedQuadruplet
    (30, 60),   // HiddenQuadruplet
    (34, 68),   // NakedQuintuplet
    (40, 80),   // HiddenQuintuplet
    (46, 92),   // NakedSextuplet
    (52, 104),  // HiddenSextuplet
    (60, 120),  // NakedSeptuplet
    (66, 132),  // HiddenSeptuplet
    (76, 152),  // NakedOctuplet
    (82, 164),  // HiddenOctuplet
    (52, 104),  // XWing
    (70, 140),  // Swordfish
    (90, 180),  // SinglesChaining
];

impl StrategyKind {
    /// Number of techniques in the catalogue.
    pub const COUNT: usize = 24;

    /// All techniques in catalogue (ascending difficulty) order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::AmendNotes,
        Self::SimplifyNotes,
        Self::NakedSingle,
        Self::HiddenSingle,
        Self::NakedPair,
        Self::HiddenPair,
        Self::PointingPair,
        Self::NakedTriplet,
        Self::PointingTriplet,
        Self::HiddenTriplet,
        Self::BoxLineReduction,
        Self::NakedQuadruplet,
        Self::HiddenQuadruplet,
        Self::NakedQuintuplet,
        Self::HiddenQuintuplet,
        Self::NakedSextuplet,
        Self::HiddenSextuplet,
        Self::NakedSeptuplet,
        Self::HiddenSeptuplet,
        Self::NakedOctuplet,
        Self::HiddenOctuplet,
        Self::XWing,
        Self::Swordfish,
        Self::SinglesChaining,
    ];

    /// The highest upper difficulty bound in the catalogue.
    pub const MAX_STEP_DIFFICULTY: u16 = {
        let mut max = 0;
        let mut i = 0;
        while i < Self::COUNT {
            if DIFFICULTY_BOUNDS[i].1 > max {
                max = DIFFICULTY_BOUNDS[i].1;
            }
            i += 1;
        }
        max
    };

    /// Returns the dense catalogue index of this technique.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the naked tuple technique for a size 1-8.
    ///
    /// # Panics
    ///
    /// Panics if `size` is outside 1-8.
    #[must_use]
    pub const fn naked_tuple(size: usize) -> Self {
        match size {
            1 => Self::NakedSingle,
            2 => Self::NakedPair,
            3 => Self::NakedTriplet,
            4 => Self::NakedQuadruplet,
            5 => Self::NakedQuintuplet,
            6 => Self::NakedSextuplet,
            7 => Self::NakedSeptuplet,
            8 => Self::NakedOctuplet,
            _ => panic!("naked tuple size out of range"),
        }
    }

    /// Returns the hidden tuple technique for a size 1-8.
    ///
    /// # Panics
    ///
    /// Panics if `size` is outside 1-8.
    #[must_use]
    pub const fn hidden_tuple(size: usize) -> Self {
        match size {
            1 => Self::HiddenSingle,
            2 => Self::HiddenPair,
            3 => Self::HiddenTriplet,
            4 => Self::HiddenQuadruplet,
            5 => Self::HiddenQuintuplet,
            6 => Self::HiddenSextuplet,
            7 => Self::HiddenSeptuplet,
            8 => Self::HiddenOctuplet,
            _ => panic!("hidden tuple size out of range"),
        }
    }

    /// Returns the `[lower, upper]` difficulty range of this technique.
    #[must_use]
    pub const fn difficulty_bounds(self) -> (u16, u16) {
        DIFFICULTY_BOUNDS[self.index()]
    }

    /// Returns `true` for the lightweight bucket of techniques whose
    /// contribution to a puzzle's difficulty is capped.
    #[must_use]
    pub const fn is_simple(self) -> bool {
        matches!(self, Self::AmendNotes | Self::SimplifyNotes | Self::NakedSingle)
    }

    /// Returns the direct logical prerequisite of this technique.
    ///
    /// The fixed chain: each naked tuple implies the next smaller one down
    /// to naked single, each hidden tuple implies the naked tuple of the
    /// same size, and pointing pair implies hidden single.
    #[must_use]
    pub const fn prerequisite(self) -> Option<Self> {
        match self {
            Self::NakedPair => Some(Self::NakedSingle),
            Self::NakedTriplet => Some(Self::NakedPair),
            Self::NakedQuadruplet => Some(Self::NakedTriplet),
            Self::NakedQuintuplet => Some(Self::NakedQuadruplet),
            Self::NakedSextuplet => Some(Self::NakedQuintuplet),
            Self::NakedSeptuplet => Some(Self::NakedSextuplet),
            Self::NakedOctuplet => Some(Self::NakedSeptuplet),
            Self::HiddenSingle => Some(Self::NakedSingle),
            Self::HiddenPair => Some(Self::NakedPair),
            Self::HiddenTriplet => Some(Self::NakedTriplet),
            Self::HiddenQuadruplet => Some(Self::NakedQuadruplet),
            Self::HiddenQuintuplet => Some(Self::NakedQuintuplet),
            Self::HiddenSextuplet => Some(Self::NakedSextuplet),
            Self::HiddenSeptuplet => Some(Self::NakedSeptuplet),
            Self::HiddenOctuplet => Some(Self::NakedOctuplet),
            Self::PointingPair => Some(Self::HiddenSingle),
            _ => None,
        }
    }

    /// Returns the display name of this technique.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AmendNotes => "Amend Notes",
            Self::SimplifyNotes => "Simplify Notes",
            Self::NakedSingle => "Naked Single",
            Self::HiddenSingle => "Hidden Single",
            Self::NakedPair => "Naked Pair",
            Self::HiddenPair => "Hidden Pair",
            Self::PointingPair => "Pointing Pair",
            Self::NakedTriplet => "Naked Triplet",
            Self::PointingTriplet => "Pointing Triplet",
            Self::HiddenTriplet => "Hidden Triplet",
            Self::BoxLineReduction => "Box-Line Reduction",
            Self::NakedQuadruplet => "Naked Quadruplet",
            Self::HiddenQuadruplet => "Hidden Quadruplet",
            Self::NakedQuintuplet => "Naked Quintuplet",
            Self::HiddenQuintuplet => "Hidden Quintuplet",
            Self::NakedSextuplet => "Naked Sextuplet",
            Self::HiddenSextuplet => "Hidden Sextuplet",
            Self::NakedSeptuplet => "Naked Septuplet",
            Self::HiddenSeptuplet => "Hidden Septuplet",
            Self::NakedOctuplet => "Naked Octuplet",
            Self::HiddenOctuplet => "Hidden Octuplet",
            Self::XWing => "X-Wing",
            Self::Swordfish => "Swordfish",
            Self::SinglesChaining => "Singles Chaining",
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The result of one successful technique detection.
///
/// A deduction only exists once a technique has identified itself on the
/// current grid: detection returns `Option<Deduction>`, so there is no
/// way to read cause or effect data from an unidentified attempt.
#[derive(Debug, Clone)]
pub struct Deduction {
    kind: StrategyKind,
    cause: TinyVec<[Position; 8]>,
    houses: Vec<House>,
    restored: Vec<Position>,
    placements: Vec<(Position, Digit)>,
    eliminations: Vec<(Position, CandidateSet)>,
    difficulty: u16,
}

impl Deduction {
    pub(crate) fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            cause: TinyVec::new(),
            houses: Vec::new(),
            restored: Vec::new(),
            placements: Vec::new(),
            eliminations: Vec::new(),
            difficulty: kind.difficulty_bounds().0,
        }
    }

    pub(crate) fn with_cause(mut self, cause: impl IntoIterator<Item = Position>) -> Self {
        self.cause.extend(cause);
        self
    }

    pub(crate) fn with_houses(mut self, houses: impl IntoIterator<Item = House>) -> Self {
        self.houses.extend(houses);
        self
    }

    pub(crate) fn with_restored(mut self, restored: impl IntoIterator<Item = Position>) -> Self {
        self.restored.extend(restored);
        self
    }

    pub(crate) fn with_placement(mut self, pos: Position, digit: Digit) -> Self {
        self.placements.push((pos, digit));
        self
    }

    pub(crate) fn with_eliminations(
        mut self,
        eliminations: impl IntoIterator<Item = (Position, CandidateSet)>,
    ) -> Self {
        self.eliminations.extend(eliminations);
        self
    }

    /// Interpolates the difficulty within this technique's bounds.
    ///
    /// `ratio` is clamped to 0.0..=1.0; 0 scores the lower bound, 1 the
    /// upper.
    pub(crate) fn with_difficulty_ratio(mut self, ratio: f64) -> Self {
        let (lower, upper) = self.kind.difficulty_bounds();
        let span = f64::from(upper - lower);
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let offset = (span * ratio.clamp(0.0, 1.0)).round() as u16;
        self.difficulty = lower + offset;
        self
    }

    /// Returns the technique that produced this deduction.
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Returns the cells responsible for the deduction, in detection order.
    ///
    /// Duplicates are permitted when one cell justifies several effects.
    #[must_use]
    pub fn cause(&self) -> &[Position] {
        &self.cause
    }

    /// Returns the cause cells as a sorted, deduplicated set.
    ///
    /// Drill candidacy and drill exclusion compare cause sets, not orders.
    #[must_use]
    pub fn cause_set(&self) -> Vec<Position> {
        let mut set: Vec<_> = self.cause.to_vec();
        set.sort_unstable();
        set.dedup();
        set
    }

    /// Returns the implicated houses.
    #[must_use]
    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    /// Returns cells whose notes are restored to the full set before the
    /// eliminations apply (the amend-notes correction path).
    #[must_use]
    pub fn restored(&self) -> &[Position] {
        &self.restored
    }

    /// Returns the values to place.
    #[must_use]
    pub fn placements(&self) -> &[(Position, Digit)] {
        &self.placements
    }

    /// Returns the notes to remove, each tagged with its cell.
    #[must_use]
    pub fn eliminations(&self) -> &[(Position, CandidateSet)] {
        &self.eliminations
    }

    /// Returns the interpolated difficulty of this single step.
    #[must_use]
    pub const fn difficulty(&self) -> u16 {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order_matches_discriminants() {
        for (i, kind) in StrategyKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_bounds_are_ordered_ranges() {
        for kind in StrategyKind::ALL {
            let (lower, upper) = kind.difficulty_bounds();
            assert!(lower >= 1);
            assert!(lower <= upper, "{kind}");
        }
        assert_eq!(StrategyKind::MAX_STEP_DIFFICULTY, 180);
    }

    #[test]
    fn test_prerequisite_chains_terminate() {
        for kind in StrategyKind::ALL {
            let mut current = kind;
            let mut hops = 0;
            while let Some(prev) = current.prerequisite() {
                assert!(prev.index() < current.index(), "{prev} before {current}");
                current = prev;
                hops += 1;
                assert!(hops <= StrategyKind::COUNT);
            }
        }
    }

    #[test]
    fn test_tuple_lookup() {
        assert_eq!(StrategyKind::naked_tuple(1), StrategyKind::NakedSingle);
        assert_eq!(StrategyKind::naked_tuple(8), StrategyKind::NakedOctuplet);
        assert_eq!(StrategyKind::hidden_tuple(2), StrategyKind::HiddenPair);
    }

    #[test]
    fn test_difficulty_interpolation_clamps() {
        let base = Deduction::new(StrategyKind::NakedPair);
        assert_eq!(base.clone().with_difficulty_ratio(0.0).difficulty(), 10);
        assert_eq!(base.clone().with_difficulty_ratio(1.0).difficulty(), 20);
        assert_eq!(base.clone().with_difficulty_ratio(0.5).difficulty(), 15);
        assert_eq!(base.clone().with_difficulty_ratio(7.0).difficulty(), 20);
        assert_eq!(base.with_difficulty_ratio(-3.0).difficulty(), 10);
    }

    #[test]
    fn test_cause_set_deduplicates_and_sorts() {
        let ded = Deduction::new(StrategyKind::NakedSingle).with_cause([
            Position::new(5, 5),
            Position::new(0, 1),
            Position::new(5, 5),
        ]);
        assert_eq!(ded.cause().len(), 3);
        assert_eq!(
            ded.cause_set(),
            vec![Position::new(0, 1), Position::new(5, 5)]
        );
    }
}
