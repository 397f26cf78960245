//! Board coordinates.

use std::fmt::{self, Display};

/// A cell coordinate on the 9×9 board.
///
/// Rows and columns are 0-8. Cells are arranged in a flat arena in row-major
/// order, so [`Position::index`] is a direct index into 81-element arrays.
///
/// # Examples
///
/// ```
/// use notewise_core::Position;
///
/// let pos = Position::new(4, 7);
/// assert_eq!(pos.index(), 4 * 9 + 7);
/// assert_eq!(pos.box_index(), 5);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Creates a position from row and column coordinates.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is 9 or greater.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 9 && col < 9, "position out of range");
        Self { row, col }
    }

    /// Creates a position from a row-major arena index 0-80.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 81 or greater.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        assert!(index < 81, "arena index out of range");
        Self {
            row: index / 9,
            col: index % 9,
        }
    }

    /// Returns the top-left position of a 3×3 box.
    ///
    /// # Panics
    ///
    /// Panics if `box_index` is 9 or greater.
    #[must_use]
    pub const fn box_origin(box_index: u8) -> Self {
        assert!(box_index < 9, "box index out of range");
        Self {
            row: (box_index / 3) * 3,
            col: (box_index % 3) * 3,
        }
    }

    /// Returns the `i`-th cell (0-8, row-major) of a 3×3 box.
    ///
    /// # Panics
    ///
    /// Panics if `box_index` or `i` is 9 or greater.
    #[must_use]
    pub const fn from_box(box_index: u8, i: u8) -> Self {
        assert!(i < 9, "box cell index out of range");
        let origin = Self::box_origin(box_index);
        Self {
            row: origin.row + i / 3,
            col: origin.col + i % 3,
        }
    }

    /// Returns the row coordinate (0-8).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column coordinate (0-8).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the row-major arena index (0-80).
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * 9 + self.col as usize
    }

    /// Returns the index (0-8) of the 3×3 box containing this position.
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.row / 3) * 3 + self.col / 3
    }

    /// Returns the cell index (0-8, row-major) of this position within its box.
    #[must_use]
    pub const fn box_cell_index(self) -> u8 {
        (self.row % 3) * 3 + self.col % 3
    }

    /// Returns `true` if the two positions share a row, column, or box.
    ///
    /// A position does not see itself.
    #[must_use]
    pub fn sees(self, other: Self) -> bool {
        self != other
            && (self.row == other.row
                || self.col == other.col
                || self.box_index() == other.box_index())
    }

    /// Returns an iterator over all 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..81).map(Self::from_index)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}
