//! Parsed 81-cell digit grids.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};

use crate::{CandidateSet, Digit, House, Position};

/// An 81-cell grid of placed digits, indexed by [`Position`].
///
/// Cells hold `Some(Digit)` when placed and `None` when empty. The textual
/// form is the canonical 81-character row-major string where `'0'` denotes
/// an empty cell; parsing additionally accepts `'.'` and `'_'` for empty and
/// ignores whitespace, so the human-readable multi-line layout round-trips.
///
/// # Examples
///
/// ```
/// use notewise_core::{DigitGrid, Position};
///
/// let grid: DigitGrid = "
///     53. .7. ...
///     6.. 195 ...
///     .98 ... .6.
///     8.. .6. ..3
///     4.. 8.3 ..1
///     7.. .2. ..6
///     .6. ... 28.
///     ... 419 ..5
///     ... .8. .79
/// "
/// .parse()?;
///
/// assert_eq!(grid.get(Position::new(0, 0)).map(u8::from), Some(5));
/// assert_eq!(grid.empty_count(), 51);
/// # Ok::<(), notewise_core::ParseGridError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitGrid {
    cells: [Option<Digit>; 81],
}

impl Default for DigitGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitGrid {
    /// Creates an empty grid.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: [None; 81] }
    }

    /// Returns the digit placed at a position, if any.
    #[must_use]
    pub const fn get(&self, pos: Position) -> Option<Digit> {
        self.cells[pos.index()]
    }

    /// Places or clears the digit at a position.
    pub const fn set(&mut self, pos: Position, digit: Option<Digit>) {
        self.cells[pos.index()] = digit;
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Returns `true` if every cell is placed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns the house that holds a duplicate placed digit, if any.
    #[must_use]
    pub fn duplicate_house(&self) -> Option<House> {
        for house in House::ALL {
            let mut seen = CandidateSet::new();
            for pos in house.cells() {
                if let Some(digit) = self.get(pos)
                    && !seen.insert(digit)
                {
                    return Some(house);
                }
            }
        }
        None
    }

    /// Returns `true` if the grid is complete and every house is a
    /// permutation of the digits 1-9.
    #[must_use]
    pub fn is_filled_legal(&self) -> bool {
        self.is_complete() && self.duplicate_house().is_none()
    }
}

impl FromStr for DigitGrid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; 81];
        let mut count = 0;
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            if count == 81 {
                return Err(ParseGridError::InvalidLength { length: count + 1 });
            }
            cells[count] = match c {
                '0' | '.' | '_' => None,
                _ => Some(
                    Digit::from_char(c).ok_or(ParseGridError::InvalidCharacter { found: c })?,
                ),
            };
            count += 1;
        }
        if count != 81 {
            return Err(ParseGridError::InvalidLength { length: count });
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for DigitGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if f.alternate() && i > 0 && i % 9 == 0 {
                writeln!(f)?;
            }
            match cell {
                Some(digit) => write!(f, "{digit}")?,
                None => write!(f, "0")?,
            }
        }
        Ok(())
    }
}

/// An error parsing a [`DigitGrid`] from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ParseGridError {
    /// The input does not contain exactly 81 cell symbols.
    #[display("expected 81 cell symbols, found {length}")]
    InvalidLength {
        /// Number of non-whitespace symbols found (saturating at 82).
        length: usize,
    },
    /// The input contains a symbol other than '0'-'9', '.', or '_'.
    #[display("invalid cell symbol {found:?}")]
    InvalidCharacter {
        /// The offending character.
        found: char,
    },
}
