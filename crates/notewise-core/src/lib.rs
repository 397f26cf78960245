//! Core data types for the notewise Sudoku annotation engine.
//!
//! This crate provides the leaf types shared by the solving and rating
//! layers:
//!
//! - [`Digit`]: a validated Sudoku digit 1-9
//! - [`Position`]: a board coordinate with row-major arena indexing
//! - [`House`]: a row, column, or 3×3 box
//! - [`CandidateSet`]: a 9-bit membership set of candidate digits, with
//!   combinatorial subset enumeration
//! - [`DigitGrid`]: a parsed 81-cell grid with textual round-tripping
//!
//! # Examples
//!
//! ```
//! use notewise_core::{CandidateSet, Digit};
//!
//! let mut notes = CandidateSet::FULL;
//! notes.remove(Digit::new(5));
//! assert_eq!(notes.len(), 8);
//!
//! // Every 3-element subset of the 9 candidate slots.
//! assert_eq!(CandidateSet::subsets(3).count(), 84);
//! ```

pub mod candidate_set;
pub mod digit;
pub mod grid;
pub mod house;
pub mod position;

pub use self::{
    candidate_set::CandidateSet,
    digit::Digit,
    grid::{DigitGrid, ParseGridError},
    house::House,
    position::Position,
};
