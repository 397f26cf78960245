//! Live solving state: cell arena and per-house bookkeeping.

use notewise_core::{CandidateSet, Digit, DigitGrid, House, Position};

use crate::{Deduction, StrategyKind};

/// One grid position: an optional placed value and its remaining notes.
///
/// A placed cell has empty notes; an unplaced cell's notes are a superset of
/// the true remaining possibilities (strategies only remove notes they have
/// proven impossible, except through the deliberate amend-notes correction
/// path which restores the full set first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    value: Option<Digit>,
    notes: CandidateSet,
}

impl Cell {
    const UNPLACED: Self = Self {
        value: None,
        notes: CandidateSet::FULL,
    };

    /// Returns the placed value, if any.
    #[must_use]
    pub const fn value(self) -> Option<Digit> {
        self.value
    }

    /// Returns the remaining candidate notes.
    #[must_use]
    pub const fn notes(self) -> CandidateSet {
        self.notes
    }

    /// Returns `true` if no value has been placed.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.value.is_none()
    }
}

/// The live board state a [`Solver`](crate::Solver) works on.
///
/// Cells live in a flat arena indexed by [`Position::index`]. For each of
/// the 27 houses the grid maintains derived views: the set of values already
/// placed and a per-strategy "already fully searched since the last relevant
/// change" cache.
///
/// All value placements go through [`set_value`](Self::set_value): it is
/// the single mutation point that keeps the house bookkeeping consistent and
/// invalidates the search cache for the three houses touched. Note removals
/// invalidate the same way, so the cache can never hide a deduction.
#[derive(Debug, Clone)]
pub struct SolveGrid {
    cells: [Cell; 81],
    placed: [CandidateSet; 27],
    searched: [u32; 27],
    reference: Option<DigitGrid>,
}

impl SolveGrid {
    /// Creates a grid with every cell unplaced and all notes available.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [Cell::UNPLACED; 81],
            placed: [CandidateSet::EMPTY; 27],
            searched: [0; 27],
            reference: None,
        }
    }

    /// Builds a grid from the given clues.
    ///
    /// Givens are placed without pruning peer notes; pruning is the simplify
    /// notes technique's job, so every removal is attributable to a step.
    #[must_use]
    pub fn from_givens(givens: &DigitGrid) -> Self {
        let mut grid = Self::empty();
        for pos in Position::all() {
            if let Some(digit) = givens.get(pos) {
                grid.set_value(pos, digit);
            }
        }
        grid
    }

    /// Attaches the known solution, enabling the amend-notes technique to
    /// detect notes that wrongly dropped the true value.
    pub fn set_reference_solution(&mut self, solution: DigitGrid) {
        self.reference = Some(solution);
    }

    /// Returns the attached reference solution, if any.
    #[must_use]
    pub const fn reference_solution(&self) -> Option<&DigitGrid> {
        self.reference.as_ref()
    }

    /// Returns the cell at a position.
    #[must_use]
    pub const fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Returns the value placed at a position, if any.
    #[must_use]
    pub const fn value(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.index()].value
    }

    /// Returns the remaining notes at a position.
    #[must_use]
    pub const fn notes(&self, pos: Position) -> CandidateSet {
        self.cells[pos.index()].notes
    }

    /// Returns `true` if the position has no placed value.
    #[must_use]
    pub const fn is_empty(&self, pos: Position) -> bool {
        self.cells[pos.index()].value.is_none()
    }

    /// Places a value, updating all three houses' bookkeeping.
    ///
    /// This is the only mutation point for placements; bypassing it would
    /// desynchronize the house views.
    ///
    /// # Panics
    ///
    /// Panics if the position already holds a value.
    pub fn set_value(&mut self, pos: Position, digit: Digit) {
        let cell = &mut self.cells[pos.index()];
        assert!(cell.value.is_none(), "cell already placed");
        cell.value = Some(digit);
        cell.notes = CandidateSet::EMPTY;

        for house in House::of(pos) {
            let h = house.index();
            self.placed[h].insert(digit);
            self.searched[h] = 0;
        }
    }

    /// Removes one note from a cell, returning `true` if it was present.
    pub fn remove_note(&mut self, pos: Position, digit: Digit) -> bool {
        let removed = self.cells[pos.index()].notes.remove(digit);
        if removed {
            self.invalidate(pos);
        }
        removed
    }

    /// Removes every note in `set` from a cell, returning `true` if any was
    /// present.
    pub fn remove_notes(&mut self, pos: Position, set: CandidateSet) -> bool {
        let removed = self.cells[pos.index()].notes.remove_all(set);
        if removed {
            self.invalidate(pos);
        }
        removed
    }

    /// Restores a cell's notes to the full set.
    pub fn reset_notes(&mut self, pos: Position) {
        self.cells[pos.index()].notes = CandidateSet::FULL;
        self.invalidate(pos);
    }

    /// Overwrites a cell's notes, for restoring a saved in-progress state.
    pub fn set_notes(&mut self, pos: Position, notes: CandidateSet) {
        self.cells[pos.index()].notes = notes;
        self.invalidate(pos);
    }

    /// Returns the set of values already placed in a house.
    #[must_use]
    pub const fn placed_in(&self, house: House) -> CandidateSet {
        self.placed[house.index()]
    }

    /// Returns the empty cells of a house in house order.
    #[must_use]
    pub fn empty_cells_in(&self, house: House) -> Vec<Position> {
        house
            .cells()
            .into_iter()
            .filter(|&pos| self.is_empty(pos))
            .collect()
    }

    /// Returns every empty position in row-major order.
    #[must_use]
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::all().filter(|&pos| self.is_empty(pos)).collect()
    }

    /// Returns the values still placeable at a position: the full set minus
    /// everything placed in the cell's row, column, and box.
    #[must_use]
    pub fn allowed_at(&self, pos: Position) -> CandidateSet {
        let mut blocked = CandidateSet::new();
        for house in House::of(pos) {
            blocked |= self.placed_in(house);
        }
        !blocked
    }

    /// Returns `true` if every cell holds a value.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cells.iter().all(|cell| cell.value.is_some())
    }

    /// Returns the number of unplaced cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Exports the placed values as a [`DigitGrid`].
    #[must_use]
    pub fn to_digit_grid(&self) -> DigitGrid {
        let mut grid = DigitGrid::new();
        for pos in Position::all() {
            grid.set(pos, self.value(pos));
        }
        grid
    }

    /// Returns `true` if the (strategy, house) pair has been fully searched
    /// with no deduction since the last relevant change.
    #[must_use]
    pub const fn was_searched(&self, kind: StrategyKind, house: House) -> bool {
        self.searched[house.index()] & (1 << kind as u32) != 0
    }

    /// Marks a (strategy, house) pair as fully searched.
    ///
    /// The mark is dropped again whenever any cell of the house changes, so
    /// the cache is purely an optimization and never hides a deduction.
    pub const fn mark_searched(&mut self, kind: StrategyKind, house: House) {
        self.searched[house.index()] |= 1 << kind as u32;
    }

    /// Applies a deduction: note restorations, then note removals, then
    /// value placements.
    pub fn apply(&mut self, deduction: &Deduction) {
        for &pos in deduction.restored() {
            self.reset_notes(pos);
        }
        for &(pos, set) in deduction.eliminations() {
            self.remove_notes(pos, set);
        }
        for &(pos, digit) in deduction.placements() {
            self.set_value(pos, digit);
        }
    }

    fn invalidate(&mut self, pos: Position) {
        for house in House::of(pos) {
            self.searched[house.index()] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(value: u8) -> Digit {
        Digit::new(value)
    }

    #[test]
    fn test_empty_grid_has_full_notes() {
        let grid = SolveGrid::empty();
        for pos in Position::all() {
            assert!(grid.is_empty(pos));
            assert_eq!(grid.notes(pos), CandidateSet::FULL);
        }
        assert_eq!(grid.empty_count(), 81);
    }

    #[test]
    fn test_set_value_updates_house_bookkeeping() {
        let mut grid = SolveGrid::empty();
        let pos = Position::new(4, 7);
        grid.set_value(pos, digit(6));

        assert_eq!(grid.value(pos), Some(digit(6)));
        assert!(grid.notes(pos).is_empty());
        for house in House::of(pos) {
            assert!(grid.placed_in(house).contains(digit(6)));
            assert_eq!(grid.empty_cells_in(house).len(), 8);
        }
        // An unrelated house is untouched.
        assert!(grid.placed_in(House::Row(0)).is_empty());
    }

    #[test]
    fn test_from_givens_does_not_prune_peer_notes() {
        let mut givens = DigitGrid::new();
        givens.set(Position::new(0, 0), Some(digit(5)));
        let grid = SolveGrid::from_givens(&givens);

        // The peer still carries the full note set; pruning is a technique.
        assert_eq!(grid.notes(Position::new(0, 1)), CandidateSet::FULL);
        assert!(grid.placed_in(House::Row(0)).contains(digit(5)));
    }

    #[test]
    fn test_allowed_at_combines_three_houses() {
        let mut grid = SolveGrid::empty();
        grid.set_value(Position::new(0, 8), digit(1)); // row peer
        grid.set_value(Position::new(8, 0), digit(2)); // column peer
        grid.set_value(Position::new(1, 1), digit(3)); // box peer

        let allowed = grid.allowed_at(Position::new(0, 0));
        assert_eq!(allowed.len(), 6);
        for value in [1, 2, 3] {
            assert!(!allowed.contains(digit(value)));
        }
    }

    #[test]
    fn test_search_cache_invalidation() {
        let mut grid = SolveGrid::empty();
        let house = House::Row(3);
        let kind = StrategyKind::NakedPair;

        assert!(!grid.was_searched(kind, house));
        grid.mark_searched(kind, house);
        assert!(grid.was_searched(kind, house));

        // A note removal in the house clears every strategy's mark for it.
        grid.remove_note(Position::new(3, 5), digit(9));
        assert!(!grid.was_searched(kind, house));

        grid.mark_searched(kind, house);
        grid.set_value(Position::new(3, 0), digit(1));
        assert!(!grid.was_searched(kind, house));

        // Changes elsewhere leave the mark alone.
        grid.mark_searched(kind, house);
        grid.remove_note(Position::new(8, 8), digit(1));
        assert!(grid.was_searched(kind, house));
    }

    #[test]
    fn test_remove_note_reports_change() {
        let mut grid = SolveGrid::empty();
        let pos = Position::new(2, 2);
        assert!(grid.remove_note(pos, digit(4)));
        assert!(!grid.remove_note(pos, digit(4)));

        grid.reset_notes(pos);
        assert_eq!(grid.notes(pos), CandidateSet::FULL);
    }

    #[test]
    fn test_to_digit_grid_round_trip() {
        let givens: DigitGrid =
            "310084002200150006570003010423708095760030000009562030050006070007000900000001500"
                .parse()
                .unwrap();
        let grid = SolveGrid::from_givens(&givens);
        assert_eq!(grid.to_digit_grid(), givens);
    }
}
