//! Explainable solving hints.

use std::fmt::{self, Display};

use crate::{Deduction, StrategyKind};

/// An immutable snapshot of one applied deduction, with display text.
///
/// The wrapped [`Deduction`] carries the structured data (cause cells,
/// houses, placements, note removals); the hint adds fixed human-readable
/// explanations keyed by technique.
#[derive(Debug, Clone)]
pub struct Hint {
    deduction: Deduction,
}

impl Hint {
    pub(crate) fn new(deduction: Deduction) -> Self {
        Self { deduction }
    }

    /// Returns the technique behind this hint.
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        self.deduction.kind()
    }

    /// Returns the underlying deduction.
    #[must_use]
    pub const fn deduction(&self) -> &Deduction {
        &self.deduction
    }

    /// Returns a short description of what the technique spotted.
    #[must_use]
    pub const fn info(&self) -> &'static str {
        match self.kind() {
            StrategyKind::AmendNotes => "This cell's notes no longer match what the board allows.",
            StrategyKind::SimplifyNotes => {
                "A value placed nearby still lingers in this cell's notes."
            }
            StrategyKind::NakedSingle => "Only one candidate remains in this cell.",
            StrategyKind::HiddenSingle => {
                "Within one house, a value has exactly one cell left to go."
            }
            StrategyKind::NakedPair => {
                "Two cells in one house share the same two candidates between them."
            }
            StrategyKind::HiddenPair => {
                "Two values in one house are confined to the same two cells."
            }
            StrategyKind::PointingPair => {
                "Inside one box, a value is restricted to two cells on a single line."
            }
            StrategyKind::NakedTriplet => {
                "Three cells in one house cover exactly three candidates between them."
            }
            StrategyKind::PointingTriplet => {
                "Inside one box, a value is restricted to three cells on a single line."
            }
            StrategyKind::HiddenTriplet => {
                "Three values in one house are confined to the same three cells."
            }
            StrategyKind::BoxLineReduction => {
                "Along one line, a value only fits inside a single box."
            }
            StrategyKind::NakedQuadruplet => {
                "Four cells in one house cover exactly four candidates between them."
            }
            StrategyKind::HiddenQuadruplet => {
                "Four values in one house are confined to the same four cells."
            }
            StrategyKind::NakedQuintuplet => {
                "Five cells in one house cover exactly five candidates between them."
            }
            StrategyKind::HiddenQuintuplet => {
                "Five values in one house are confined to the same five cells."
            }
            StrategyKind::NakedSextuplet => {
                "Six cells in one house cover exactly six candidates between them."
            }
            StrategyKind::HiddenSextuplet => {
                "Six values in one house are confined to the same six cells."
            }
            StrategyKind::NakedSeptuplet => {
                "Seven cells in one house cover exactly seven candidates between them."
            }
            StrategyKind::HiddenSeptuplet => {
                "Seven values in one house are confined to the same seven cells."
            }
            StrategyKind::NakedOctuplet => {
                "Eight cells in one house cover exactly eight candidates between them."
            }
            StrategyKind::HiddenOctuplet => {
                "Eight values in one house are confined to the same eight cells."
            }
            StrategyKind::XWing => {
                "A value forms a rectangle: two lines each allow it in the same two spots."
            }
            StrategyKind::Swordfish => {
                "A value is locked into three lines that share the same three crossing lines."
            }
            StrategyKind::SinglesChaining => {
                "A chain of either-or pairs links these cells: one alternating half is true."
            }
        }
    }

    /// Returns a short instruction for acting on the hint.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self.kind() {
            StrategyKind::AmendNotes => {
                "Rebuild the cell's notes from the values already placed around it."
            }
            StrategyKind::SimplifyNotes => "Remove the placed value from the cell's notes.",
            StrategyKind::NakedSingle | StrategyKind::HiddenSingle => {
                "Place the value in the highlighted cell."
            }
            StrategyKind::NakedPair
            | StrategyKind::NakedTriplet
            | StrategyKind::NakedQuadruplet
            | StrategyKind::NakedQuintuplet
            | StrategyKind::NakedSextuplet
            | StrategyKind::NakedSeptuplet
            | StrategyKind::NakedOctuplet => {
                "Remove the set's candidates from the other cells of the house."
            }
            StrategyKind::HiddenPair
            | StrategyKind::HiddenTriplet
            | StrategyKind::HiddenQuadruplet
            | StrategyKind::HiddenQuintuplet
            | StrategyKind::HiddenSextuplet
            | StrategyKind::HiddenSeptuplet
            | StrategyKind::HiddenOctuplet => {
                "Remove every other candidate from the confining cells."
            }
            StrategyKind::PointingPair | StrategyKind::PointingTriplet => {
                "Remove the value from the rest of the line outside the box."
            }
            StrategyKind::BoxLineReduction => {
                "Remove the value from the box's cells off that line."
            }
            StrategyKind::XWing | StrategyKind::Swordfish => {
                "Remove the value from the crossing lines outside the pattern."
            }
            StrategyKind::SinglesChaining => {
                "Remove the value from cells that contradict both colors of the chain."
            }
        }
    }
}

impl Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.kind(), self.info(), self.action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_has_text() {
        for kind in StrategyKind::ALL {
            let hint = Hint::new(Deduction::new(kind));
            assert!(!hint.info().is_empty());
            assert!(!hint.action().is_empty());
            assert!(hint.to_string().starts_with(kind.name()));
        }
    }
}
