//! Test utilities for strategy implementations.
//!
//! [`StrategyTester`] tracks an initial and a current grid state, applies
//! techniques, and asserts on the resulting placements and notes. All
//! assertion methods return `self` for fluent chaining and use
//! `#[track_caller]` so failures report the test's own source line.
//!
//! # Examples
//!
//! ```
//! use notewise_core::{CandidateSet, Digit, Position};
//! use notewise_solver::{SolveGrid, strategy::NakedTuple, testing::StrategyTester};
//!
//! let pos = Position::new(0, 0);
//! StrategyTester::new(SolveGrid::empty())
//!     .mutate(|grid| grid.set_notes(pos, CandidateSet::from_iter([Digit::new(7)])))
//!     .apply_once(&NakedTuple::new(1))
//!     .assert_placed(pos, Digit::new(7));
//! ```

use std::str::FromStr as _;

use notewise_core::{CandidateSet, Digit, DigitGrid, Position};

use crate::{
    SolveGrid,
    strategy::{SearchMode, Strategy},
};

/// A harness for exercising one technique against a grid.
#[derive(Debug)]
pub struct StrategyTester {
    initial: SolveGrid,
    current: SolveGrid,
}

impl StrategyTester {
    /// Creates a tester over an initial grid state.
    pub fn new(grid: SolveGrid) -> Self {
        Self {
            initial: grid.clone(),
            current: grid,
        }
    }

    /// Creates a tester from a grid string, in [`DigitGrid`] text format.
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be parsed as a grid.
    #[track_caller]
    pub fn from_str(s: &str) -> Self {
        let grid = DigitGrid::from_str(s).unwrap();
        Self::new(SolveGrid::from_givens(&grid))
    }

    /// Adjusts the grid before the technique runs.
    ///
    /// The adjusted state becomes the new baseline for change assertions.
    pub fn mutate(mut self, f: impl FnOnce(&mut SolveGrid)) -> Self {
        f(&mut self.current);
        self.initial = self.current.clone();
        self
    }

    /// Detects and applies the technique once, if it matches.
    pub fn apply_once<S>(mut self, strategy: &S) -> Self
    where
        S: Strategy,
    {
        if let Some(deduction) = strategy.find(&mut self.current, SearchMode::First) {
            self.current.apply(&deduction);
        }
        self
    }

    /// Applies the technique repeatedly until it no longer matches.
    pub fn apply_until_stuck<S>(mut self, strategy: &S) -> Self
    where
        S: Strategy,
    {
        while let Some(deduction) = strategy.find(&mut self.current, SearchMode::First) {
            self.current.apply(&deduction);
        }
        self
    }

    /// Asserts that a previously empty cell now holds the given value.
    ///
    /// # Panics
    ///
    /// Panics if the cell was already placed initially, or does not hold
    /// the expected value now.
    #[track_caller]
    pub fn assert_placed(self, pos: Position, digit: Digit) -> Self {
        assert!(
            self.initial.is_empty(pos),
            "expected {pos} to start empty, but it held {:?}",
            self.initial.value(pos)
        );
        assert_eq!(
            self.current.value(pos),
            Some(digit),
            "expected {digit} to be placed at {pos}, but the cell holds {:?} with notes {}",
            self.current.value(pos),
            self.current.notes(pos)
        );
        self
    }

    /// Asserts a cell's exact note set.
    ///
    /// # Panics
    ///
    /// Panics if the notes differ.
    #[track_caller]
    pub fn assert_notes(self, pos: Position, expected: CandidateSet) -> Self {
        let actual = self.current.notes(pos);
        assert_eq!(
            actual, expected,
            "expected notes {expected} at {pos}, found {actual}"
        );
        self
    }

    /// Asserts that a cell's notes include every listed value.
    ///
    /// # Panics
    ///
    /// Panics if any value is missing.
    #[track_caller]
    pub fn assert_notes_contain<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let wanted = CandidateSet::from_iter(digits);
        let actual = self.current.notes(pos);
        assert!(
            actual.is_superset(wanted),
            "expected notes at {pos} to include {wanted}, found {actual}"
        );
        self
    }

    /// Asserts that a cell's notes include none of the listed values.
    ///
    /// # Panics
    ///
    /// Panics if any value is still present.
    #[track_caller]
    pub fn assert_notes_missing<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let unwanted = CandidateSet::from_iter(digits);
        let actual = self.current.notes(pos);
        let lingering = actual & unwanted;
        assert!(
            lingering.is_empty(),
            "expected notes at {pos} to exclude {unwanted}, but {lingering} remain"
        );
        self
    }

    /// Asserts that a cell's value and notes are unchanged from the
    /// baseline.
    ///
    /// # Panics
    ///
    /// Panics if the cell changed.
    #[track_caller]
    pub fn assert_no_change(self, pos: Position) -> Self {
        assert_eq!(
            self.initial.cell(pos),
            self.current.cell(pos),
            "expected no change at {pos}"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{BoxedStrategy, NakedTuple};
    use crate::{Deduction, SolveGrid, StrategyKind};

    #[derive(Debug)]
    struct NoOpStrategy;

    impl Strategy for NoOpStrategy {
        fn kind(&self) -> StrategyKind {
            StrategyKind::NakedSingle
        }

        fn clone_box(&self) -> BoxedStrategy {
            Box::new(NoOpStrategy)
        }

        fn instances(&self, _grid: &mut SolveGrid, _stop_at_first: bool) -> Vec<Deduction> {
            Vec::new()
        }
    }

    #[test]
    fn test_from_str_builds_givens() {
        StrategyTester::from_str(
            "
            5__ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
            ___ ___ ___
        ",
        )
        .apply_once(&NoOpStrategy)
        .assert_no_change(Position::new(0, 1));
    }

    #[test]
    fn test_mutate_resets_baseline() {
        let pos = Position::new(3, 3);
        StrategyTester::new(SolveGrid::empty())
            .mutate(|grid| {
                grid.remove_note(pos, Digit::new(1));
            })
            .assert_no_change(pos)
            .assert_notes_missing(pos, [Digit::new(1)]);
    }

    #[test]
    fn test_apply_once_places_single() {
        let pos = Position::new(6, 2);
        StrategyTester::new(SolveGrid::empty())
            .mutate(|grid| grid.set_notes(pos, CandidateSet::from_iter([Digit::new(4)])))
            .apply_once(&NakedTuple::new(1))
            .assert_placed(pos, Digit::new(4));
    }

    #[test]
    #[should_panic(expected = "expected no change")]
    fn test_assert_no_change_detects_placement() {
        let pos = Position::new(6, 2);
        let _ = StrategyTester::new(SolveGrid::empty())
            .mutate(|grid| grid.set_notes(pos, CandidateSet::from_iter([Digit::new(4)])))
            .apply_once(&NakedTuple::new(1))
            .assert_no_change(pos);
    }
}
