use notewise_core::{CandidateSet, House, Position};

use crate::{
    Deduction, SolveGrid, StrategyKind,
    strategy::{BoxedStrategy, Strategy, spread_ratio},
};

/// Pointing pairs and triplets.
///
/// Within a box, a value whose candidate cells all fall on one row or
/// column "points" along that line: the value must land inside the box, so
/// it can be struck from the rest of the line.
#[derive(Debug, Clone, Copy)]
pub struct PointingTuple {
    size: usize,
}

impl PointingTuple {
    /// Creates a pointing tuple detector for size 2 or 3.
    ///
    /// # Panics
    ///
    /// Panics if `size` is not 2 or 3.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        assert!(size == 2 || size == 3, "pointing tuple size out of range");
        Self { size }
    }

    /// The line shared by all homes, if there is one.
    fn shared_line(homes: &[Position]) -> Option<House> {
        let first = homes[0];
        if homes.iter().all(|pos| pos.row() == first.row()) {
            Some(House::Row(first.row()))
        } else if homes.iter().all(|pos| pos.col() == first.col()) {
            Some(House::Column(first.col()))
        } else {
            None
        }
    }
}

impl Strategy for PointingTuple {
    fn kind(&self) -> StrategyKind {
        match self.size {
            2 => StrategyKind::PointingPair,
            _ => StrategyKind::PointingTriplet,
        }
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn instances(&self, grid: &mut SolveGrid, stop_at_first: bool) -> Vec<Deduction> {
        let mut found = Vec::new();
        'boxes: for house in House::BOXES {
            for digit in !grid.placed_in(house) {
                let homes: Vec<_> = house
                    .cells()
                    .into_iter()
                    .filter(|&pos| grid.is_empty(pos) && grid.notes(pos).contains(digit))
                    .collect();
                if homes.len() != self.size {
                    continue;
                }
                let Some(line) = Self::shared_line(&homes) else {
                    continue;
                };

                let single = CandidateSet::from_digit(digit);
                let eliminations: Vec<_> = line
                    .cells()
                    .into_iter()
                    .filter(|&pos| {
                        !house.contains(pos)
                            && grid.is_empty(pos)
                            && grid.notes(pos).contains(digit)
                    })
                    .map(|pos| (pos, single))
                    .collect();
                if eliminations.is_empty() {
                    continue;
                }

                let ratio = spread_ratio(house, &homes);
                found.push(
                    Deduction::new(self.kind())
                        .with_cause(homes)
                        .with_houses([house, line])
                        .with_eliminations(eliminations)
                        .with_difficulty_ratio(ratio),
                );
                if stop_at_first {
                    break 'boxes;
                }
            }
        }
        found
    }
}
