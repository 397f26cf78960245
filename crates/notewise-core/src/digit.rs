//! Sudoku digit representation.

use std::fmt::{self, Display};

/// A Sudoku digit in the range 1-9.
///
/// The constructor validates the range once, so every `Digit` in circulation
/// is known to be in-range.
///
/// # Examples
///
/// ```
/// use notewise_core::Digit;
///
/// let digit = Digit::new(5);
/// assert_eq!(digit.value(), 5);
/// assert_eq!(digit.index(), 4);
///
/// for digit in Digit::ALL {
///     assert!((1..=9).contains(&digit.value()));
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digit(u8);

impl Digit {
    /// Array containing all digits from 1 to 9 in ascending order.
    pub const ALL: [Self; 9] = [
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
        Self(8),
        Self(9),
    ];

    /// Creates a digit from a value in the range 1-9.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in the range 1-9.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        assert!(1 <= value && value <= 9, "digit out of range");
        Self(value)
    }

    /// Creates a digit from a bit index in the range 0-8.
    ///
    /// Index 0 maps to digit 1, index 8 to digit 9.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 9 or greater.
    #[must_use]
    pub const fn from_index(index: u8) -> Self {
        assert!(index < 9, "digit index out of range");
        Self(index + 1)
    }

    /// Parses a digit from the characters '1'-'9'.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        c.to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .filter(|d| (1..=9).contains(d))
            .map(Self)
    }

    /// Returns the numeric value of this digit (1-9).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the bit index of this digit (0-8).
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0 - 1
    }

    /// Returns the character '1'-'9' for this digit.
    #[must_use]
    pub fn to_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_index_round_trip() {
        for digit in Digit::ALL {
            assert_eq!(Digit::new(digit.value()), digit);
            assert_eq!(Digit::from_index(digit.index()), digit);
        }
        assert_eq!(Digit::new(1).index(), 0);
        assert_eq!(Digit::new(9).index(), 8);
    }

    #[test]
    fn test_char_round_trip() {
        for digit in Digit::ALL {
            assert_eq!(Digit::from_char(digit.to_char()), Some(digit));
        }
        assert_eq!(Digit::from_char('0'), None);
        assert_eq!(Digit::from_char('a'), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Digit::new(7)), "7");
    }

    #[test]
    #[should_panic(expected = "digit out of range")]
    fn test_new_rejects_zero() {
        let _ = Digit::new(0);
    }

    #[test]
    #[should_panic(expected = "digit out of range")]
    fn test_new_rejects_ten() {
        let _ = Digit::new(10);
    }
}
