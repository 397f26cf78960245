use notewise_core::{CandidateSet, Digit, House, Position};

use crate::{
    Deduction, SolveGrid, StrategyKind,
    strategy::{BoxedStrategy, Strategy},
};

/// Basic fish patterns: X-Wing (size 2) and Swordfish (size 3).
///
/// Pick `size` base lines in which a value's candidate cells fall within a
/// shared set of `size` cover lines. The value must occupy exactly one cell
/// per base line, consuming every cover line, so it can be struck from the
/// cover lines everywhere outside the base lines. Both orientations are
/// searched: rows as base with columns as cover, and the transpose.
#[derive(Debug, Clone, Copy)]
pub struct Fish {
    size: usize,
}

impl Fish {
    /// Creates the X-Wing detector.
    #[must_use]
    pub const fn x_wing() -> Self {
        Self { size: 2 }
    }

    /// Creates the Swordfish detector.
    #[must_use]
    pub const fn swordfish() -> Self {
        Self { size: 3 }
    }

    fn at(base_is_rows: bool, base: u8, cover: u8) -> Position {
        if base_is_rows {
            Position::new(base, cover)
        } else {
            Position::new(cover, base)
        }
    }

    fn base_house(base_is_rows: bool, index: u8) -> House {
        if base_is_rows {
            House::Row(index)
        } else {
            House::Column(index)
        }
    }

    fn cover_house(base_is_rows: bool, index: u8) -> House {
        Self::base_house(!base_is_rows, index)
    }

    /// Cover-line occupancy of the value per base line, as nine index sets.
    fn homes(grid: &SolveGrid, digit: Digit, base_is_rows: bool) -> [CandidateSet; 9] {
        let mut homes = [CandidateSet::EMPTY; 9];
        for pos in Position::all() {
            if grid.is_empty(pos) && grid.notes(pos).contains(digit) {
                let (base, cover) = if base_is_rows {
                    (pos.row(), pos.col())
                } else {
                    (pos.col(), pos.row())
                };
                homes[usize::from(base)].insert(Digit::from_index(cover));
            }
        }
        homes
    }

    fn search(
        &self,
        grid: &SolveGrid,
        digit: Digit,
        base_is_rows: bool,
        found: &mut Vec<Deduction>,
        stop_at_first: bool,
    ) -> bool {
        let homes = Self::homes(grid, digit, base_is_rows);
        let single = CandidateSet::from_digit(digit);

        for picks in CandidateSet::subsets(self.size) {
            let mut cover = CandidateSet::new();
            let mut usable = true;
            for pick in picks {
                let base_homes = homes[usize::from(pick.index())];
                if base_homes.len() < 2 || base_homes.len() > self.size {
                    usable = false;
                    break;
                }
                cover |= base_homes;
            }
            if !usable || cover.len() != self.size {
                continue;
            }

            let mut cause = Vec::new();
            for pick in picks {
                for home in homes[usize::from(pick.index())] {
                    cause.push(Self::at(base_is_rows, pick.index(), home.index()));
                }
            }

            let mut eliminations = Vec::new();
            for cover_line in cover {
                for base_line in 0..9u8 {
                    if picks.contains(Digit::from_index(base_line)) {
                        continue;
                    }
                    let pos = Self::at(base_is_rows, base_line, cover_line.index());
                    if grid.is_empty(pos) && grid.notes(pos).contains(digit) {
                        eliminations.push((pos, single));
                    }
                }
            }
            if eliminations.is_empty() {
                continue;
            }

            let houses: Vec<_> = picks
                .into_iter()
                .map(|pick| Self::base_house(base_is_rows, pick.index()))
                .chain(
                    cover
                        .into_iter()
                        .map(|line| Self::cover_house(base_is_rows, line.index())),
                )
                .collect();
            let ratio = Self::pattern_spread(picks, cover);
            found.push(
                Deduction::new(self.kind())
                    .with_cause(cause)
                    .with_houses(houses)
                    .with_eliminations(eliminations)
                    .with_difficulty_ratio(ratio),
            );
            if stop_at_first {
                return true;
            }
        }
        false
    }

    /// Combined base and cover spread, in `0.0..=1.0`.
    fn pattern_spread(picks: CandidateSet, cover: CandidateSet) -> f64 {
        let spread = |set: CandidateSet| -> f64 {
            let (min, max) = set
                .into_iter()
                .fold((8, 0), |(min, max), d| (min.min(d.index()), max.max(d.index())));
            f64::from(max.saturating_sub(min)) / 8.0
        };
        (spread(picks) + spread(cover)) / 2.0
    }
}

impl Strategy for Fish {
    fn kind(&self) -> StrategyKind {
        match self.size {
            2 => StrategyKind::XWing,
            _ => StrategyKind::Swordfish,
        }
    }

    fn clone_box(&self) -> BoxedStrategy {
        Box::new(*self)
    }

    fn instances(&self, grid: &mut SolveGrid, stop_at_first: bool) -> Vec<Deduction> {
        let mut found = Vec::new();
        for digit in Digit::ALL {
            for base_is_rows in [true, false] {
                if self.search(grid, digit, base_is_rows, &mut found, stop_at_first) {
                    return found;
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::SearchMode;

    fn digit(value: u8) -> Digit {
        Digit::new(value)
    }

    /// Restricts `value` in the given row to the listed columns.
    fn restrict_row(grid: &mut SolveGrid, value: Digit, row: u8, cols: &[u8]) {
        for col in 0..9 {
            if !cols.contains(&col) {
                grid.remove_note(Position::new(row, col), value);
            }
        }
    }

    #[test]
    fn test_x_wing_on_rows_prunes_columns() {
        let mut grid = SolveGrid::empty();
        restrict_row(&mut grid, digit(5), 1, &[2, 7]);
        restrict_row(&mut grid, digit(5), 6, &[2, 7]);

        let step = Fish::x_wing().find(&mut grid, SearchMode::First).unwrap();
        assert_eq!(step.kind(), StrategyKind::XWing);
        assert_eq!(step.cause_set().len(), 4);
        assert_eq!(
            step.houses(),
            [
                House::Row(1),
                House::Row(6),
                House::Column(2),
                House::Column(7),
            ]
        );
        // 7 remaining cells per cover column.
        assert_eq!(step.eliminations().len(), 14);
        assert!(
            step.eliminations()
                .iter()
                .all(|&(pos, set)| (pos.col() == 2 || pos.col() == 7)
                    && set == CandidateSet::from_iter([digit(5)]))
        );
    }

    #[test]
    fn test_misaligned_rows_are_no_fish() {
        let mut grid = SolveGrid::empty();
        restrict_row(&mut grid, digit(5), 1, &[2, 7]);
        restrict_row(&mut grid, digit(5), 6, &[2, 6]);
        assert!(Fish::x_wing().find(&mut grid, SearchMode::First).is_none());
    }

    #[test]
    fn test_swordfish_allows_two_cell_lines() {
        // Three rows covering columns {0, 4, 8} with only two homes each.
        let mut grid = SolveGrid::empty();
        restrict_row(&mut grid, digit(3), 0, &[0, 4]);
        restrict_row(&mut grid, digit(3), 3, &[4, 8]);
        restrict_row(&mut grid, digit(3), 7, &[0, 8]);

        let step = Fish::swordfish().find(&mut grid, SearchMode::First).unwrap();
        assert_eq!(step.kind(), StrategyKind::Swordfish);
        assert_eq!(step.cause_set().len(), 6);
        assert_eq!(step.eliminations().len(), 18);
    }

    #[test]
    fn test_no_elimination_no_fish() {
        let mut grid = SolveGrid::empty();
        restrict_row(&mut grid, digit(5), 1, &[2, 7]);
        restrict_row(&mut grid, digit(5), 6, &[2, 7]);
        for row in [0, 2, 3, 4, 5, 7, 8] {
            grid.remove_note(Position::new(row, 2), digit(5));
            grid.remove_note(Position::new(row, 7), digit(5));
        }
        assert!(Fish::x_wing().find(&mut grid, SearchMode::First).is_none());
    }
}
