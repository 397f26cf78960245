use notewise_core::{House, Position};

use crate::{
    Deduction, SolveGrid, StrategyKind,
    strategy::{BoxedStrategy, Strategy},
};

/// A self-correcting pass that repairs wrongly pruned notes.
///
/// If a cell's notes were emptied by prior play, or no longer contain the
/// cell's true value when a reference solution is attached, the cell's notes
/// are restored to the full set and every value already placed in its row,
/// column, and box is struck again. Fires once per affected cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct AmendNotes {}

impl AmendNotes {
    /// Creates a new `AmendNotes` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    fn needs_amending(grid: &SolveGrid, pos: Position) -> bool {
        let notes = grid.notes(pos);
        if notes.is_empty() {
            return true;
        }
        if let Some(reference) = grid.reference_solution()
            && let Some(truth) = reference.get(pos)
        {
            return !notes.contains(truth);
        }
        false
    }

    fn amend(grid: &SolveGrid, pos: Position) -> Deduction {
        let blocked = !grid.allowed_at(pos);
        let mut deduction = Deduction::new(StrategyKind::AmendNotes)
            .with_cause([pos])
            .with_houses(House::of(pos))
            .with_restored([pos]);
        if !blocked.is_empty() {
            deduction = deduction.with_eliminations([(pos, blocked)]);
        }
        deduction
    }
}

impl Strategy for AmendNotes {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AmendNotes
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn instances(&self, grid: &mut SolveGrid, stop_at_first: bool) -> Vec<Deduction> {
        let mut found = Vec::new();
        for pos in grid.empty_positions() {
            if Self::needs_amending(grid, pos) {
                found.push(Self::amend(grid, pos));
                if stop_at_first {
                    break;
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use notewise_core::{CandidateSet, Digit, DigitGrid};

    use super::*;
    use crate::{strategy::SearchMode, testing::StrategyTester};

    #[test]
    fn test_amends_emptied_notes() {
        let pos = Position::new(4, 4);
        StrategyTester::new(SolveGrid::empty())
            .mutate(|grid| grid.set_notes(pos, CandidateSet::EMPTY))
            .apply_once(&AmendNotes::new())
            .assert_notes(pos, CandidateSet::FULL);
    }

    #[test]
    fn test_amended_cell_loses_placed_peers() {
        let pos = Position::new(4, 4);
        StrategyTester::new(SolveGrid::empty())
            .mutate(|grid| {
                grid.set_value(Position::new(4, 0), Digit::new(7));
                grid.set_value(Position::new(0, 4), Digit::new(2));
                grid.set_notes(pos, CandidateSet::EMPTY);
            })
            .apply_once(&AmendNotes::new())
            .assert_notes_missing(pos, [Digit::new(7), Digit::new(2)])
            .assert_notes_contain(pos, [Digit::new(1)]);
    }

    #[test]
    fn test_reference_solution_exposes_dropped_truth() {
        let solved: DigitGrid =
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179"
                .parse()
                .unwrap();
        let pos = Position::new(0, 0); // true value 5
        let mut grid = SolveGrid::empty();
        grid.set_reference_solution(solved);
        grid.remove_note(pos, Digit::new(5));

        let step = AmendNotes::new().find(&mut grid, SearchMode::First).unwrap();
        assert_eq!(step.cause(), [pos]);
        assert_eq!(step.restored(), [pos]);
    }

    #[test]
    fn test_no_match_on_healthy_notes() {
        let mut grid = SolveGrid::empty();
        grid.remove_note(Position::new(0, 0), Digit::new(9));
        assert!(AmendNotes::new().find(&mut grid, SearchMode::First).is_none());
    }
}
