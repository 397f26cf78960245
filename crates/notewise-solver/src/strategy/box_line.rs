use notewise_core::{CandidateSet, House, Position};

use crate::{
    Deduction, SolveGrid, StrategyKind,
    strategy::{BoxedStrategy, Strategy, spread_ratio},
};

/// Box-line reduction (claiming).
///
/// The mirror image of a pointing tuple: when a value's candidate cells
/// within a row or column all sit in one box, the value is claimed by that
/// line and can be struck from the box's other cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoxLineReduction {}

impl BoxLineReduction {
    /// Creates a new `BoxLineReduction` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    fn shared_box(homes: &[Position]) -> Option<House> {
        let first = homes[0];
        homes
            .iter()
            .all(|pos| pos.box_index() == first.box_index())
            .then(|| House::Box(first.box_index()))
    }
}

impl Strategy for BoxLineReduction {
    fn kind(&self) -> StrategyKind {
        StrategyKind::BoxLineReduction
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn instances(&self, grid: &mut SolveGrid, stop_at_first: bool) -> Vec<Deduction> {
        let mut found = Vec::new();
        'lines: for line in House::ROWS.into_iter().chain(House::COLUMNS) {
            for digit in !grid.placed_in(line) {
                let homes: Vec<_> = line
                    .cells()
                    .into_iter()
                    .filter(|&pos| grid.is_empty(pos) && grid.notes(pos).contains(digit))
                    .collect();
                // A lone home is a hidden single; more than three cannot fit
                // in one box.
                if homes.len() < 2 || homes.len() > 3 {
                    continue;
                }
                let Some(claimed) = Self::shared_box(&homes) else {
                    continue;
                };

                let single = CandidateSet::from_digit(digit);
                let eliminations: Vec<_> = claimed
                    .cells()
                    .into_iter()
                    .filter(|&pos| {
                        !line.contains(pos) && grid.is_empty(pos) && grid.notes(pos).contains(digit)
                    })
                    .map(|pos| (pos, single))
                    .collect();
                if eliminations.is_empty() {
                    continue;
                }

                let ratio = spread_ratio(claimed, &homes);
                found.push(
                    Deduction::new(StrategyKind::BoxLineReduction)
                        .with_cause(homes)
                        .with_houses([line, claimed])
                        .with_eliminations(eliminations)
                        .with_difficulty_ratio(ratio),
                );
                if stop_at_first {
                    break 'lines;
                }
            }
        }
        found
    }
}
