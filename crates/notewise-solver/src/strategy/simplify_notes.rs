use notewise_core::{CandidateSet, Digit, Position};

use crate::{
    Deduction, SolveGrid, StrategyKind,
    strategy::{BoxedStrategy, Strategy},
};

/// Strikes a note that conflicts with a value already placed in a shared
/// house.
///
/// Each instance removes a single conflicting value from a single cell, so
/// every removal is a minimal, explainable step rather than a bulk sweep.
/// The causing cells are the placed peers holding that value.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimplifyNotes {}

impl SimplifyNotes {
    /// Creates a new `SimplifyNotes` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    fn simplify(grid: &SolveGrid, pos: Position, digit: Digit) -> Deduction {
        let mut deduction = Deduction::new(StrategyKind::SimplifyNotes)
            .with_eliminations([(pos, CandidateSet::from_digit(digit))]);
        for house in notewise_core::House::of(pos) {
            if !grid.placed_in(house).contains(digit) {
                continue;
            }
            deduction = deduction.with_houses([house]);
            for peer in house.cells() {
                if grid.value(peer) == Some(digit) {
                    deduction = deduction.with_cause([peer]);
                }
            }
        }
        deduction
    }
}

impl Strategy for SimplifyNotes {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SimplifyNotes
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn instances(&self, grid: &mut SolveGrid, stop_at_first: bool) -> Vec<Deduction> {
        let mut found = Vec::new();
        'cells: for pos in grid.empty_positions() {
            let conflicts = grid.notes(pos) & !grid.allowed_at(pos);
            for digit in conflicts {
                found.push(Self::simplify(grid, pos, digit));
                if stop_at_first {
                    break 'cells;
                }
            }
        }
        found
    }
}
