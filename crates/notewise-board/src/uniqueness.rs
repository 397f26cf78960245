//! Exhaustive solution counting for puzzle validation.

use notewise_core::{CandidateSet, Digit, DigitGrid, House, Position};

/// The outcome of counting completions of a starting grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Completions {
    /// No completion exists.
    None,
    /// Exactly one completion exists.
    Unique(DigitGrid),
    /// At least two completions exist; the search stops at the second.
    Multiple,
}

/// Counts completions of the grid by recursive backtracking.
///
/// Empty cells are tried in row-major order, each candidate in ascending
/// order, short-circuiting as soon as a second full solution is found.
pub(crate) fn count_completions(grid: &DigitGrid) -> Completions {
    let mut search = Search::new(grid);
    let empties: Vec<_> = Position::all().filter(|&pos| grid.get(pos).is_none()).collect();
    let mut work = *grid;
    search.run(&mut work, &empties, 0);
    match (search.found, search.solution) {
        (0, _) => Completions::None,
        (1, Some(solution)) => Completions::Unique(solution),
        _ => Completions::Multiple,
    }
}

struct Search {
    placed: [CandidateSet; 27],
    found: usize,
    solution: Option<DigitGrid>,
}

impl Search {
    fn new(grid: &DigitGrid) -> Self {
        let mut placed = [CandidateSet::EMPTY; 27];
        for pos in Position::all() {
            if let Some(digit) = grid.get(pos) {
                for house in House::of(pos) {
                    placed[house.index()].insert(digit);
                }
            }
        }
        Self {
            placed,
            found: 0,
            solution: None,
        }
    }

    fn allowed(&self, pos: Position) -> CandidateSet {
        let mut blocked = CandidateSet::new();
        for house in House::of(pos) {
            blocked |= self.placed[house.index()];
        }
        !blocked
    }

    fn place(&mut self, pos: Position, digit: Digit) {
        for house in House::of(pos) {
            self.placed[house.index()].insert(digit);
        }
    }

    fn unplace(&mut self, pos: Position, digit: Digit) {
        for house in House::of(pos) {
            self.placed[house.index()].remove(digit);
        }
    }

    fn run(&mut self, work: &mut DigitGrid, empties: &[Position], depth: usize) {
        if self.found >= 2 {
            return;
        }
        let Some(&pos) = empties.get(depth) else {
            self.found += 1;
            if self.found == 1 {
                self.solution = Some(*work);
            }
            return;
        };
        for digit in self.allowed(pos) {
            work.set(pos, Some(digit));
            self.place(pos, digit);
            self.run(work, empties, depth + 1);
            self.unplace(pos, digit);
            work.set(pos, None);
            if self.found >= 2 {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "310084002200150006570003010423708095760030000009562030050006070007000900000001500";
    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn test_unique_puzzle() {
        let grid: DigitGrid = PUZZLE.parse().unwrap();
        let Completions::Unique(solution) = count_completions(&grid) else {
            panic!("expected a unique completion");
        };
        assert!(solution.is_filled_legal());
        for pos in Position::all() {
            if let Some(given) = grid.get(pos) {
                assert_eq!(solution.get(pos), Some(given));
            }
        }
    }

    #[test]
    fn test_full_grid_counts_itself() {
        let grid: DigitGrid = SOLVED.parse().unwrap();
        assert_eq!(count_completions(&grid), Completions::Unique(grid));
    }

    #[test]
    fn test_contradictory_grid_has_no_completion() {
        // Two cells of one row forced to fight over the same final value.
        let mut grid: DigitGrid = SOLVED.parse().unwrap();
        grid.set(Position::new(0, 0), None);
        grid.set(Position::new(0, 1), None);
        grid.set(Position::new(0, 2), Some(Digit::new(3)));
        assert_eq!(count_completions(&grid), Completions::None);
    }

    #[test]
    fn test_empty_grid_has_many_completions() {
        assert_eq!(count_completions(&DigitGrid::new()), Completions::Multiple);
    }
}
