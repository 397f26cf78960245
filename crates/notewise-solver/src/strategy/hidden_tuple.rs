use notewise_core::{CandidateSet, House};

use crate::{
    Deduction, SolveGrid, StrategyKind,
    strategy::{BoxedStrategy, Strategy, notes_field_ratio, spread_ratio},
};

/// Hidden sets of any size from single (1) through octuplet (8).
///
/// A hidden set is `size` values that, among a house's empty cells, appear
/// only within one particular set of `size` cells. Whatever other notes
/// those cells carry can be struck. Values already placed in the house are
/// excluded from consideration on both sides.
///
/// The single is special-cased: one cell is the only home for a value, so
/// the value is placed directly, and the causing cells are the eight other
/// cells of the house that rule everywhere else out.
#[derive(Debug, Clone, Copy)]
pub struct HiddenTuple {
    size: usize,
}

impl HiddenTuple {
    /// Creates a hidden tuple detector for a size 1-8.
    ///
    /// # Panics
    ///
    /// Panics if `size` is outside 1-8.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        assert!(size >= 1 && size <= 8, "hidden tuple size out of range");
        Self { size }
    }

    fn singles(grid: &mut SolveGrid, stop_at_first: bool) -> Vec<Deduction> {
        let mut found = Vec::new();
        'houses: for house in House::ALL {
            if grid.was_searched(StrategyKind::HiddenSingle, house) {
                continue;
            }
            let mut any = false;
            for digit in !grid.placed_in(house) {
                let mut home = None;
                for pos in house.cells() {
                    if grid.is_empty(pos) && grid.notes(pos).contains(digit) {
                        if home.is_some() {
                            home = None;
                            break;
                        }
                        home = Some(pos);
                    }
                }
                let Some(home) = home else { continue };

                let cause: Vec<_> = house
                    .cells()
                    .into_iter()
                    .filter(|&pos| pos != home)
                    .collect();
                let ratio = notes_field_ratio(grid, &cause);
                any = true;
                found.push(
                    Deduction::new(StrategyKind::HiddenSingle)
                        .with_cause(cause)
                        .with_houses([house])
                        .with_placement(home, digit)
                        .with_difficulty_ratio(ratio),
                );
                if stop_at_first {
                    break 'houses;
                }
            }
            if !any {
                grid.mark_searched(StrategyKind::HiddenSingle, house);
            }
        }
        found
    }

    fn tuple_at(&self, grid: &SolveGrid, house: House, picks: CandidateSet) -> Option<Deduction> {
        let mut members = Vec::with_capacity(self.size);
        let mut inside = CandidateSet::new();
        for pick in picks {
            let pos = house.cell(pick.index());
            if !grid.is_empty(pos) {
                return None;
            }
            inside |= grid.notes(pos);
            members.push(pos);
        }

        let mut outside = CandidateSet::new();
        for pos in house.cells() {
            if grid.is_empty(pos) && !members.contains(&pos) {
                outside |= grid.notes(pos);
            }
        }

        let confined = inside & !outside & !grid.placed_in(house);
        if confined.len() != self.size {
            return None;
        }

        let mut eliminations = Vec::new();
        for &pos in &members {
            let hit = grid.notes(pos) & !confined;
            if !hit.is_empty() {
                eliminations.push((pos, hit));
            }
        }
        if eliminations.is_empty() {
            return None;
        }
        Some(
            Deduction::new(self.kind())
                .with_cause(members.iter().copied())
                .with_houses([house])
                .with_eliminations(eliminations)
                .with_difficulty_ratio(spread_ratio(house, &members)),
        )
    }
}

impl Strategy for HiddenTuple {
    fn kind(&self) -> StrategyKind {
        StrategyKind::hidden_tuple(self.size)
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
