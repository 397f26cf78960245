//! Human-style stepping solver for Sudoku puzzles.
//!
//! This crate implements the deduction engine of the notewise workspace. It
//! keeps a live candidate state in [`SolveGrid`], detects human solving
//! techniques through the [`strategy`] catalogue, and steps through a puzzle
//! one deduction at a time via [`Solver`], producing explainable [`Hint`]s.
//!
//! # Overview
//!
//! - [`SolveGrid`]: flat 81-cell arena with per-house bookkeeping and a
//!   per-(strategy, house) search memoization cache
//! - [`strategy`]: the fixed technique catalogue, ordered from simplest to
//!   most complex, each detection producing a [`Deduction`]
//! - [`Solver`]: applies the first matching technique per step
//! - [`Hint`]: a read-only deduction snapshot with display text
//!
//! # Examples
//!
//! ```
//! use notewise_core::DigitGrid;
//! use notewise_solver::{SolveGrid, Solver};
//!
//! let grid: DigitGrid =
//!     "310084002200150006570003010423708095760030000009562030050006070007000900000001500"
//!         .parse()?;
//! let mut solver = Solver::new(SolveGrid::from_givens(&grid));
//! let hint = solver.next_step()?;
//! assert!(hint.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use derive_more::{Display, Error};

pub use self::{
    deduction::{Deduction, StrategyKind},
    grid::{Cell, SolveGrid},
    hint::Hint,
    solver::Solver,
    strategy::{BoxedStrategy, SearchMode, Strategy},
};

pub mod deduction;
pub mod grid;
pub mod hint;
pub mod solver;
pub mod strategy;
pub mod testing;

/// An error produced by the stepping solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SolverError {
    /// No technique in the catalogue matched even though empty cells remain.
    ///
    /// On a validated, uniquely-solvable grid this indicates an internal
    /// invariant violation rather than a data error.
    #[display("no deduction available with {empty_cells} empty cells remaining")]
    Stalled {
        /// Number of cells still unplaced when the solver stalled.
        empty_cells: usize,
    },
}
