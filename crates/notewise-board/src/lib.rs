//! Puzzle validation, difficulty scoring, and drill selection.
//!
//! This crate is the top-level entry point of the notewise workspace. A
//! [`Board`] takes a textual puzzle, proves it has exactly one solution,
//! drives the stepping solver to completion, and annotates the puzzle with
//! the techniques it required, a normalized difficulty in 1-1000, and the
//! techniques usable as an unambiguous first-move practice drill. The
//! independent [`refutation`] module provides a secondary, randomized
//! difficulty signal.
//!
//! # Examples
//!
//! ```
//! use notewise_board::Board;
//! use notewise_solver::StrategyKind;
//!
//! let board = Board::analyze(
//!     "310084002200150006570003010423708095760030000009562030050006070007000900000001500",
//!     42,
//! )?;
//! assert!(board.solution().is_filled_legal());
//! assert!(board.uses(StrategyKind::NakedSingle));
//! assert!((1..=1000).contains(&board.difficulty()));
//! # Ok::<(), notewise_board::BoardError>(())
//! ```

pub use self::board::{Board, BoardError};

pub mod board;
pub mod refutation;
mod uniqueness;
