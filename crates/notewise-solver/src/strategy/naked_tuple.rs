use notewise_core::{CandidateSet, House, Position};

use crate::{
    Deduction, SolveGrid, StrategyKind,
    strategy::{BoxedStrategy, Strategy, spread_ratio},
};

/// Naked sets of any size from single (1) through octuplet (8).
///
/// A naked set is `size` empty cells of one house whose combined notes total
/// exactly `size` values. Those values can then be struck from every other
/// cell of the house. A single directly places its one value; larger sets
/// must produce at least one actual removal to count as identified.
///
/// When the set's cells additionally share a second house (a row or column
/// tuple sitting inside one box, or a box tuple on one line), the pruning
/// extends into that house as well.
#[derive(Debug, Clone, Copy)]
pub struct NakedTuple {
    size: usize,
}

impl NakedTuple {
    /// Creates a naked tuple detector for a size 1-8.
    ///
    /// # Panics
    ///
    /// Panics if `size` is outside 1-8.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        assert!(size >= 1 && size <= 8, "naked tuple size out of range");
        Self { size }
    }

    fn singles(grid: &mut SolveGrid, stop_at_first: bool) -> Vec<Deduction> {
        let mut found = Vec::new();
        'rows: for house in House::ROWS {
            if grid.was_searched(StrategyKind::NakedSingle, house) {
                continue;
            }
            let mut any = false;
            for pos in house.cells() {
                if !grid.is_empty(pos) {
                    continue;
                }
                if let Some(digit) = grid.notes(pos).as_single() {
                    any = true;
                    found.push(
                        Deduction::new(StrategyKind::NakedSingle)
                            .with_cause([pos])
                            .with_houses(House::of(pos))
                            .with_placement(pos, digit),
                    );
                    if stop_at_first {
                        break 'rows;
                    }
                }
            }
            if !any {
                grid.mark_searched(StrategyKind::NakedSingle, house);
            }
        }
        found
    }

    /// A second house shared by all members, extending the pruning scope.
    fn extension_house(house: House, members: &[Position]) -> Option<House> {
        let first = members[0];
        match house {
            House::Row(_) | House::Column(_) => members
                .iter()
                .all(|pos| pos.box_index() == first.box_index())
                .then(|| House::Box(first.box_index())),
            House::Box(_) => {
                if members.iter().all(|pos| pos.row() == first.row()) {
                    Some(House::Row(first.row()))
                } else if members.iter().all(|pos| pos.col() == first.col()) {
                    Some(House::Column(first.col()))
                } else {
                    None
                }
            }
        }
    }

    fn tuple_at(&self, grid: &SolveGrid, house: House, picks: CandidateSet) -> Option<Deduction> {
        let mut members = Vec::with_capacity(self.size);
        let mut union = CandidateSet::new();
        for pick in picks {
            let pos = house.cell(pick.index());
            if !grid.is_empty(pos) {
                return None;
            }
            union |= grid.notes(pos);
            members.push(pos);
        }
        if union.len() != self.size {
            return None;
        }

        let mut eliminations = Vec::new();
        for pos in house.cells() {
            if !grid.is_empty(pos) || members.contains(&pos) {
                continue;
            }
            let hit = grid.notes(pos) & union;
            if !hit.is_empty() {
                eliminations.push((pos, hit));
            }
        }

        let mut houses = vec![house];
        if let Some(extension) = Self::extension_house(house, &members) {
            let mut extended = false;
            for pos in extension.cells() {
                // Cells shared with the primary house were already pruned.
                if house.contains(pos) || !grid.is_empty(pos) {
                    continue;
                }
                let hit = grid.notes(pos) & union;
                if !hit.is_empty() {
                    eliminations.push((pos, hit));
                    extended = true;
                }
            }
            if extended {
                houses.push(extension);
            }
        }

        if eliminations.is_empty() {
            return None;
        }
        Some(
            Deduction::new(self.kind())
                .with_cause(members.iter().copied())
                .with_houses(houses)
                .with_eliminations(eliminations)
                .with_difficulty_ratio(spread_ratio(house, &members)),
        )
    }
}

impl Strategy for NakedTuple {
    fn kind(&self) -> StrategyKind {
        StrategyKind::naked_tuple(self.size)
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn instances(&self, grid: &mut SolveGrid, stop_at_first: bool) -> Vec<Deduction> {
        if self.size == 1 {
            return Self::singles(grid, stop_at_first);
        }
        let kind = self.kind();
        let mut found = Vec::new();
        'houses: for house in House::ALL {
            if grid.was_searched(kind, house) {
                continue;
            }
            let mut any = false;
            for picks in CandidateSet::subsets(self.size) {
                if let Some(deduction) = self.tuple_at(grid, house, picks) {
                    any = true;
                    found.push(deduction);
                    if stop_at_first {
                        break 'houses;
                    }
                }
            }
            if !any {
                grid.mark_searched(kind, house);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use notewise_core::Digit;

    use super::*;
    use crate::{strategy::SearchMode, testing::StrategyTester};

    fn digit(value: u8) -> Digit {
        Digit::new(value)
    }

    fn keep_only(grid: &mut SolveGrid, pos: Position, values: &[u8]) {
        let keep: CandidateSet = values.iter().map(|&v| digit(v)).collect();
        grid.set_notes(pos, keep);
    }

    #[test]
    fn test_naked_single_places_last_note() {
        let pos = Position::new(2, 6);
        StrategyTester::new(SolveGrid::empty())
            .mutate(|grid| keep_only(grid, pos, &[9]))
            .apply_once(&NakedTuple::new(1))
            .assert_placed(pos, digit(9));
    }

    #[test]
    fn test_naked_single_cause_is_the_cell() {
        let pos = Position::new(2, 6);
        let mut grid = SolveGrid::empty();
        keep_only(&mut grid, pos, &[9]);
        let step = NakedTuple::new(1).find(&mut grid, SearchMode::First).unwrap();
        assert_eq!(step.kind(), StrategyKind::NakedSingle);
        assert_eq!(step.cause(), [pos]);
        assert_eq!(step.placements(), [(pos, digit(9))]);
    }

    #[test]
    fn test_naked_pair_prunes_the_row() {
        let a = Position::new(4, 1);
        let b = Position::new(4, 7);
        let other = Position::new(4, 3);
        StrategyTester::new(SolveGrid::empty())
            .mutate(|grid| {
                keep_only(grid, a, &[2, 5]);
                keep_only(grid, b, &[2, 5]);
            })
            .apply_once(&NakedTuple::new(2))
            .assert_notes_missing(other, [digit(2), digit(5)])
            .assert_notes_contain(other, [digit(1), digit(9)])
            // The pair cells themselves keep their notes.
            .assert_notes_contain(a, [digit(2), digit(5)]);
    }

    #[test]
    fn test_naked_pair_extends_into_shared_box() {
        // Pair in row 0, both cells inside box 0.
        let mut grid = SolveGrid::empty();
        keep_only(&mut grid, Position::new(0, 0), &[3, 7]);
        keep_only(&mut grid, Position::new(0, 2), &[3, 7]);

        let step = NakedTuple::new(2).find(&mut grid, SearchMode::First).unwrap();
        assert_eq!(step.houses(), [House::Row(0), House::Box(0)]);
        let targets: Vec<_> = step.eliminations().iter().map(|&(pos, _)| pos).collect();
        // Box cells off the row are pruned exactly once.
        assert!(targets.contains(&Position::new(1, 1)));
        assert_eq!(
            targets.iter().filter(|&&p| p == Position::new(1, 1)).count(),
            1
        );
    }

    #[test]
    fn test_closed_tuple_is_not_identified() {
        // A pair with nothing left to prune anywhere is not reported.
        let mut grid = SolveGrid::empty();
        keep_only(&mut grid, Position::new(8, 0), &[1, 2]);
        keep_only(&mut grid, Position::new(8, 8), &[1, 2]);
        for col in 1..8 {
            keep_only(&mut grid, Position::new(8, col), &[3, 4, 5, 6, 7, 8, 9]);
        }
        // Columns 0 and 8 and the two boxes still contain 1/2 notes, so only
        // restrict the scan's primary house by checking the row instance.
        let instances = NakedTuple::new(2).instances(&mut grid, false);
        assert!(
            instances
                .iter()
                .all(|d| d.houses().first() != Some(&House::Row(8)))
        );
    }

    #[test]
    fn test_triplet_with_partial_note_sets() {
        // {1,2}, {2,3}, {1,3} in one column form a naked triplet.
        let mut grid = SolveGrid::empty();
        keep_only(&mut grid, Position::new(0, 4), &[1, 2]);
        keep_only(&mut grid, Position::new(4, 4), &[2, 3]);
        keep_only(&mut grid, Position::new(8, 4), &[1, 3]);

        let step = NakedTuple::new(3).find(&mut grid, SearchMode::First).unwrap();
        assert_eq!(step.kind(), StrategyKind::NakedTriplet);
        assert_eq!(step.cause_set().len(), 3);
        assert!(
            step.eliminations()
                .iter()
                .any(|&(pos, _)| pos == Position::new(2, 4))
        );
    }

    #[test]
    fn test_spread_affects_difficulty() {
        let mut near = SolveGrid::empty();
        keep_only(&mut near, Position::new(0, 3), &[4, 8]);
        keep_only(&mut near, Position::new(0, 4), &[4, 8]);
        let near_step = NakedTuple::new(2).find(&mut near, SearchMode::First).unwrap();

        let mut far = SolveGrid::empty();
        keep_only(&mut far, Position::new(0, 0), &[4, 8]);
        keep_only(&mut far, Position::new(0, 8), &[4, 8]);
        let far_step = NakedTuple::new(2).find(&mut far, SearchMode::First).unwrap();

        assert!(near_step.difficulty() < far_step.difficulty());
    }

    #[test]
    fn test_drill_mode_rejects_two_distinct_pairs() {
        let mut grid = SolveGrid::empty();
        keep_only(&mut grid, Position::new(0, 0), &[1, 2]);
        keep_only(&mut grid, Position::new(0, 5), &[1, 2]);
        keep_only(&mut grid, Position::new(8, 3), &[8, 9]);
        keep_only(&mut grid, Position::new(8, 7), &[8, 9]);

        assert!(NakedTuple::new(2).find(&mut grid, SearchMode::First).is_some());
        assert!(NakedTuple::new(2).find(&mut grid, SearchMode::Drill).is_none());
    }
}
