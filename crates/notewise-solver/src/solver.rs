//! The stepping solver.

use crate::{
    Deduction, Hint, SolveGrid, SolverError,
    strategy::{BoxedStrategy, SearchMode, full_catalogue},
};

/// Applies the technique catalogue to a live grid, one deduction per step.
///
/// Techniques are tried in catalogue order on every step and the first match
/// wins, so the configured order is the tie-break between simultaneously
/// applicable techniques. A custom order may be supplied through
/// [`with_strategies`](Self::with_strategies).
///
/// # Examples
///
/// ```
/// use notewise_core::DigitGrid;
/// use notewise_solver::{SolveGrid, Solver};
///
/// let grid: DigitGrid =
///     "310084002200150006570003010423708095760030000009562030050006070007000900000001500"
///         .parse()?;
/// let mut solver = Solver::new(SolveGrid::from_givens(&grid));
/// while let Some(hint) = solver.next_step()? {
///     let _ = hint.kind();
/// }
/// assert!(solver.is_solved());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    grid: SolveGrid,
    strategies: Vec<BoxedStrategy>,
}

impl Solver {
    /// Creates a solver over a grid using the full technique catalogue.
    #[must_use]
    pub fn new(grid: SolveGrid) -> Self {
        Self::with_strategies(grid, full_catalogue())
    }

    /// Creates a solver with a custom technique order.
    #[must_use]
    pub fn with_strategies(grid: SolveGrid, strategies: Vec<BoxedStrategy>) -> Self {
        Self { grid, strategies }
    }

    /// Returns the current grid state.
    #[must_use]
    pub const fn grid(&self) -> &SolveGrid {
        &self.grid
    }

    /// Consumes the solver, returning the grid.
    #[must_use]
    pub fn into_grid(self) -> SolveGrid {
        self.grid
    }

    /// Returns `true` once every cell holds a value.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    /// Finds, applies, and returns the next deduction.
    ///
    /// Returns `Ok(None)` once the grid is fully solved.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Stalled`] when empty cells remain but no
    /// technique matches. On a validated, uniquely solvable puzzle this is
    /// an internal invariant violation, not an input error.
    pub fn next_step(&mut self) -> Result<Option<Hint>, SolverError> {
        if self.grid.is_solved() {
            return Ok(None);
        }
        for strategy in &self.strategies {
            if let Some(deduction) = strategy.find(&mut self.grid, SearchMode::First) {
                self.grid.apply(&deduction);
                return Ok(Some(Hint::new(deduction)));
            }
        }
        Err(SolverError::Stalled {
            empty_cells: self.grid.empty_count(),
        })
    }

    /// Returns every technique that currently matches, without mutating the
    /// grid.
    ///
    /// In [`SearchMode::Drill`], a technique whose instances disagree on
    /// their cause cells is omitted as ambiguous.
    #[must_use]
    pub fn applicable(&mut self, mode: SearchMode) -> Vec<Deduction> {
        let mut matches = Vec::new();
        for strategy in &self.strategies {
            if let Some(deduction) = strategy.find(&mut self.grid, mode) {
                matches.push(deduction);
            }
        }
        matches
    }
}
