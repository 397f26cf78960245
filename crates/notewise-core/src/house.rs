//! Houses: rows, columns, and 3×3 boxes.

use std::fmt::{self, Display};

use crate::Position;

/// A Sudoku house: a row, column, or 3×3 box.
///
/// Each house contains 9 cells in which every digit 1-9 appears at most
/// once. Houses are the scope over which group-local techniques search.
///
/// # Examples
///
/// ```
/// use notewise_core::{House, Position};
///
/// let row = House::Row(3);
/// assert_eq!(row.cell(0), Position::new(3, 0));
/// assert!(row.contains(Position::new(3, 8)));
/// assert_eq!(House::ALL.len(), 27);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum House {
    /// A row identified by its row coordinate (0-8).
    Row(u8),
    /// A column identified by its column coordinate (0-8).
    Column(u8),
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box(u8),
}

impl House {
    /// Array containing all rows (0-8).
    pub const ROWS: [Self; 9] = {
        let mut all = [Self::Row(0); 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Row(i as u8);
            i += 1;
        }
        all
    };

    /// Array containing all columns (0-8).
    pub const COLUMNS: [Self; 9] = {
        let mut all = [Self::Column(0); 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Column(i as u8);
            i += 1;
        }
        all
    };

    /// Array containing all boxes (0-8).
    pub const BOXES: [Self; 9] = {
        let mut all = [Self::Box(0); 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Box(i as u8);
            i += 1;
        }
        all
    };

    /// Array containing all houses in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row(0); 27];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Row(i as u8);
            all[i + 9] = Self::Column(i as u8);
            all[i + 18] = Self::Box(i as u8);
            i += 1;
        }
        all
    };

    /// Returns the three houses containing a position: its row, column, and box.
    #[must_use]
    pub const fn of(pos: Position) -> [Self; 3] {
        [
            Self::Row(pos.row()),
            Self::Column(pos.col()),
            Self::Box(pos.box_index()),
        ]
    }

    /// Returns a dense index 0-26 (rows 0-8, columns 9-17, boxes 18-26).
    ///
    /// Used for per-house bookkeeping arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Row(y) => y as usize,
            Self::Column(x) => 9 + x as usize,
            Self::Box(b) => 18 + b as usize,
        }
    }

    /// Converts a cell index within the house (0-8) into an absolute [`Position`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in the range 0-8.
    #[must_use]
    pub const fn cell(self, i: u8) -> Position {
        assert!(i < 9, "house cell index out of range");
        match self {
            Self::Row(y) => Position::new(y, i),
            Self::Column(x) => Position::new(i, x),
            Self::Box(b) => Position::from_box(b, i),
        }
    }

    /// Returns the ordered 9 positions belonging to this house.
    #[must_use]
    pub const fn cells(self) -> [Position; 9] {
        let mut cells = [Position::new(0, 0); 9];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            cells[i] = self.cell(i as u8);
            i += 1;
        }
        cells
    }

    /// Returns the cell index (0-8) of a position within this house, if any.
    #[must_use]
    pub fn cell_index_of(self, pos: Position) -> Option<u8> {
        match self {
            Self::Row(y) => (pos.row() == y).then_some(pos.col()),
            Self::Column(x) => (pos.col() == x).then_some(pos.row()),
            Self::Box(b) => (pos.box_index() == b).then(|| pos.box_cell_index()),
        }
    }

    /// Returns `true` if the position belongs to this house.
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        self.cell_index_of(pos).is_some()
    }
}

impl Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(y) => write!(f, "row {}", y + 1),
            Self::Column(x) => write!(f, "column {}", x + 1),
            Self::Box(b) => write!(f, "box {}", b + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_houses_cover_every_cell_three_times() {
        let mut coverage = [0u8; 81];
        for house in House::ALL {
            for pos in house.cells() {
                coverage[pos.index()] += 1;
            }
        }
        assert!(coverage.iter().all(|&c| c == 3));
    }

    #[test]
    fn test_cell_index_round_trip() {
        for house in House::ALL {
            for i in 0..9 {
                let pos = house.cell(i);
                assert_eq!(house.cell_index_of(pos), Some(i));
                assert!(house.contains(pos));
            }
        }
    }

    #[test]
    fn test_of() {
        let pos = Position::new(4, 7);
        assert_eq!(
            House::of(pos),
            [House::Row(4), House::Column(7), House::Box(5)]
        );
    }

    #[test]
    fn test_index_is_dense() {
        let mut seen = [false; 27];
        for house in House::ALL {
            assert!(!seen[house.index()]);
            seen[house.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", House::Row(0)), "row 1");
        assert_eq!(format!("{}", House::Box(8)), "box 9");
    }
}
